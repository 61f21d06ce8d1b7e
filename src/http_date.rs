// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! HTTP-date parsing for cache lifetime computation.

use chrono::{DateTime, Utc};

/// Parse an HTTP-date string (IMF-fixdate, RFC 850 or asctime) into a `chrono::DateTime<Utc>`.
pub fn parse_http_date_to_datetime(s: &str) -> anyhow::Result<DateTime<Utc>> {
    let st =
        httpdate::parse_http_date(s).map_err(|e| anyhow::anyhow!("httpdate parse error: {}", e))?;
    Ok(DateTime::<Utc>::from(st))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn parses_imf_fixdate() -> anyhow::Result<()> {
        let dt = parse_http_date_to_datetime("Wed, 21 Oct 2015 07:28:00 GMT")?;
        assert_eq!((dt.year(), dt.month(), dt.day()), (2015, 10, 21));
        Ok(())
    }

    #[test]
    fn parses_asctime() -> anyhow::Result<()> {
        let dt = parse_http_date_to_datetime("Wed Oct 21 07:28:00 2015")?;
        assert_eq!(dt.day(), 21);
        Ok(())
    }

    #[test]
    fn expires_zero_is_error() {
        assert!(parse_http_date_to_datetime("0").is_err());
    }
}
