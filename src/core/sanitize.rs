//! Display label → bare identifier.
//!
//! Cheat table descriptions are free text ("12 Health Ptr+1"). The output must
//! be accepted as an identifier by Python, C++ and C# alike, so the rules are
//! the intersection of all three.

/// Characters dropped outright after whitespace has been folded.
pub const FORBIDDEN: &[char] = &['"', '.', '<', '>', '/', '?', '-', '+', '(', ')'];

/// Turn an arbitrary label into a bare identifier.
///
/// Leading digits/whitespace are stripped, interior whitespace becomes `_`,
/// and [`FORBIDDEN`] characters are removed. Removal can expose a new leading
/// digit (`"-5x"`), so the leading strip runs again at the end. The result may
/// be empty; callers pick their own placeholder.
pub fn sanitize(label: &str) -> String
{
    let body = strip_leading(label);

    let mut out = String::with_capacity(body.len());
    for ch in body.chars()
    {
        if ch.is_whitespace()
        {
            out.push('_');
        }
        else if !FORBIDDEN.contains(&ch)
        {
            out.push(ch);
        }
    }

    match strip_leading(&out).len()
    {
        n if n == out.len() => out,
        n => out.split_off(out.len() - n),
    }
}

/// Sanitize, falling back to `placeholder` when nothing survives.
pub fn sanitize_or(
    label: &str,
    placeholder: impl FnOnce() -> String,
) -> String
{
    let ident = sanitize(label);
    if ident.is_empty() { placeholder() } else { ident }
}

fn strip_leading(s: &str) -> &str
{
    s.trim_start_matches(|c: char| c.is_ascii_digit() || c.is_whitespace())
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn strips_digits_and_forbidden_characters()
    {
        assert_eq!(sanitize("12 Health Ptr+1"), "Health_Ptr1");
        assert_eq!(sanitize("Player HP"), "Player_HP");
        assert_eq!(sanitize("  7 Ammo (clip)"), "Ammo_clip");
    }

    #[test]
    fn keeps_characters_outside_forbidden_set()
    {
        // `$` and `_` are not in the forbidden set
        assert_eq!(sanitize("123 My Cool$Var"), "My_Cool$Var");
        assert_eq!(sanitize("already_ok"), "already_ok");
    }

    #[test]
    fn degrades_to_empty()
    {
        assert_eq!(sanitize("123 "), "");
        assert_eq!(sanitize("\"...\""), "");
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn no_leading_digit_after_removal()
    {
        assert_eq!(sanitize("-5x"), "x");
        assert_eq!(sanitize("(1) Gold"), "_Gold");
    }

    #[test]
    fn placeholder_only_when_empty()
    {
        assert_eq!(sanitize_or("42", || "Unnamed0".into()), "Unnamed0");
        assert_eq!(sanitize_or("Mana", || "Unnamed0".into()), "Mana");
    }
}
