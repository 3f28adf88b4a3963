// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use thiserror::Error;

/// Reasons a comparison request produces no result. The message is shown to the user.
///
/// Missing quarters and zero divisors are not errors; they surface as
/// "not available" periods.
#[derive(Debug, Error)]
pub enum CompareError {
    #[error("Please select at least one company and a breakdown.")]
    NoSelection,

    #[error("No matching records found in database for that selection.")]
    NoMatchingData,

    #[error("Please select exactly two companies for comparison.")]
    NeedExactlyTwo,

    #[error("Not enough data found for both companies.")]
    InsufficientData,

    #[error("Storage unavailable: {0}")]
    Storage(#[from] sqlx::Error),
}

impl CompareError {
    /// True for selection problems the user can fix, false for infrastructure failures.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, CompareError::Storage(_))
    }
}
