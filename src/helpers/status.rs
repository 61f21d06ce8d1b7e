// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

/// Returns true if `status` is a redirection status (3xx).
pub fn is_redirection_status(status: u16) -> bool {
    (300..=399).contains(&status)
}

/// Returns true if `status` signals a client or server error (4xx/5xx).
pub fn is_error_status(status: u16) -> bool {
    (400..=599).contains(&status)
}
