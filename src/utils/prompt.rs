//! User prompt utilities using dialoguer

use crate::utils::error::{ConfigureError, Result};
use dialoguer::{theme::ColorfulTheme, Select};

/// Prompt for selection from a list
pub fn prompt_select<T: ToString>(prompt: &str, items: &[T], default: usize) -> Result<usize> {
    let theme = ColorfulTheme::default();
    Select::with_theme(&theme)
        .with_prompt(prompt)
        .items(items)
        .default(default)
        .interact_opt()
        .map_err(|e| ConfigureError::Io(std::io::Error::other(e.to_string())))?
        .ok_or(ConfigureError::UserCancelled)
}
