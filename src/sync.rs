pub mod fetch_state;
pub mod form_edit;
pub mod list_controller;

use std::io::{BufRead, Write};

use crate::external_api::ApiError;

/// Proof that the user agreed to an irreversible action.
///
/// Deletes cannot be issued without one.
#[derive(Debug)]
pub struct Confirmation(());

impl Confirmation {
    /// Ask a yes/no question. Only an explicit `y`/`yes` confirms.
    pub fn ask<R, W>(question: &str, mut input: R, mut output: W) -> Result<Self, ApiError>
    where
        R: BufRead,
        W: Write,
    {
        output.write_all(question.as_bytes())?;
        output.flush()?;

        let mut answer = String::new();
        input.read_line(&mut answer)?;

        let trimmed = answer.trim().to_lowercase();
        if !matches!(trimmed.as_str(), "y" | "yes") {
            return Err(ApiError::DeleteCancelledByUser);
        }
        Ok(Self(()))
    }

    /// The user confirmed up front, e.g. with `--yes`
    pub fn from_flag() -> Self {
        Self(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::{BufReader, Cursor};

    #[rstest]
    #[case(b"y\n")]
    #[case(b"yes\n")]
    #[case(b"Y")]
    #[case(b"  YES  \n")]
    fn test_confirmed(#[case] input_data: &[u8]) {
        let input = BufReader::new(Cursor::new(input_data.to_vec()));
        let mut output = Cursor::new(Vec::<u8>::new());
        assert!(Confirmation::ask("Delete? [y/n] ", input, &mut output).is_ok());
        assert_eq!(String::from_utf8(output.into_inner()).unwrap(), "Delete? [y/n] ");
    }

    #[rstest]
    #[case(b"\n")]
    #[case(b"")]
    #[case(b"n\n")]
    #[case(b"yse\n")]
    fn test_not_confirmed(#[case] input_data: &[u8]) {
        let input = BufReader::new(Cursor::new(input_data.to_vec()));
        let mut output = Cursor::new(Vec::<u8>::new());
        let result = Confirmation::ask("Delete? [y/n] ", input, &mut output);
        assert!(matches!(result, Err(ApiError::DeleteCancelledByUser)));
    }
}
