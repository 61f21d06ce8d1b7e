// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Helper utilities shared across multiple rules.
//!
//! These are the narrow collaborators rules lean on: header access, URL
//! handling, registrable domains, HTML scanning, size estimation and cache
//! lifetime computation.

pub mod cache;
pub mod domain;
pub mod headers;
pub mod html;
pub mod minify;
pub mod static_resource;
pub mod status;
pub mod uri;
