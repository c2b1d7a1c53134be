// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Argument resolution.
//!
//! Maps a parameter name to the value bound to it at one call site.

use serde_json::Value;

use crate::error::UlogError;
use crate::signature::Signature;
use crate::types::Arguments;

/// Resolve the runtime value bound to `name`.
///
/// Lookup order is keyword, then positional by declared index, then the
/// parameter's default. The receiver of a method is not part of the declared
/// parameter list, so it never shifts positional indices and resolving it by
/// name yields [`UlogError::UnknownParameter`].
///
/// # Errors
///
/// * [`UlogError::UnknownParameter`] if the signature does not declare `name`.
/// * [`UlogError::MissingArgument`] if `name` is declared but was neither
///   supplied nor defaulted.
pub fn resolve<'a>(
    name: &str,
    signature: &'a Signature,
    args: &'a Arguments,
) -> Result<&'a Value, UlogError> {
    if let Some(value) = args.get_keyword(name) {
        return Ok(value);
    }

    let index = signature
        .index_of(name)
        .ok_or_else(|| UlogError::UnknownParameter {
            name: name.to_string(),
        })?;

    if let Some(value) = args.positional().get(index) {
        return Ok(value);
    }

    signature
        .default_at(index)
        .ok_or_else(|| UlogError::MissingArgument {
            name: name.to_string(),
            index,
        })
}
