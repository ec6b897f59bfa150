use anyhow::Result;
use inquire::Text;

/// Only a lone `y`, in either case, counts as a go-ahead.
pub fn is_affirmative(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case("y")
}

pub fn confirm_tagging(key: &str, value: &str) -> Result<bool> {
    let answer = Text::new(&format!(
        "Create the tag [{key}] | [{value}] on the instances that are missing it? [y/N]"
    ))
    .prompt()?;

    Ok(is_affirmative(&answer))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_y_in_either_case() {
        assert!(is_affirmative("y"));
        assert!(is_affirmative("Y"));
        assert!(is_affirmative("  y "));
    }

    #[test]
    fn anything_else_cancels() {
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative("N"));
        assert!(!is_affirmative("yes"));
        assert!(!is_affirmative("ye"));
        assert!(!is_affirmative(""));
    }
}
