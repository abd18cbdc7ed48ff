//! Small string helpers used when rendering and parsing textual values.

/// Characters removed by [str_trim].
const WHITESPACE: [char; 6] = [' ', '\t', '\n', '\r', '\x0c', '\x0b'];

/// Joins `parts` with `delimiter` between each pair.
pub fn str_join<S: AsRef<str>>(parts: &[S], delimiter: char) -> String {
    let mut result = String::new();
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            result.push(delimiter);
        }
        result.push_str(part.as_ref());
    }
    result
}

/// Pads `input` on the right with spaces until it is at least `length` characters long.
pub fn str_pad(input: &str, length: usize) -> String {
    format!("{input:<length$}")
}

/// Splits `input` on every occurrence of `delimiter`, keeping empty pieces.
pub fn str_split(input: &str, delimiter: char) -> Vec<String> {
    input.split(delimiter).map(str::to_owned).collect()
}

/// Trims whitespace from both ends of `input`, optionally lowercasing the result.
pub fn str_trim(input: &str, to_lowercase: bool) -> String {
    let trimmed = input.trim_matches(&WHITESPACE[..]);
    if to_lowercase {
        trimmed.to_lowercase()
    } else {
        trimmed.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join() {
        assert_eq!(str_join(&["a", "b", "c"], ','), "a,b,c");
        assert_eq!(str_join(&["a"], ' '), "a");
        assert_eq!(str_join::<&str>(&[], ' '), "");
        assert_eq!(str_join(&[String::from("x"), String::new()], '-'), "x-");
    }

    #[test]
    fn test_pad() {
        assert_eq!(str_pad("ab", 4), "ab  ");
        assert_eq!(str_pad("abcd", 2), "abcd");
        assert_eq!(str_pad("", 0), "");
    }

    #[test]
    fn test_split() {
        assert_eq!(str_split("a b c", ' '), vec!["a", "b", "c"]);
        assert_eq!(str_split("a,,b", ','), vec!["a", "", "b"]);
        assert_eq!(str_split("abc", ','), vec!["abc"]);
        assert_eq!(str_split("", ','), vec![""]);
    }

    #[test]
    fn test_trim() {
        assert_eq!(str_trim("\t\n Hello \r\n", false), "Hello");
        assert_eq!(str_trim("  MiXeD\x0b", true), "mixed");
        assert_eq!(str_trim("", false), "");
    }
}
