//! Splits C function-type spellings into their parts.
//!
//! The front-end annotates a `FunctionDecl` with its full signature
//! spelling (`int (int, char **)`) and a function-pointer value with the
//! `(*)` form (`void (*)(int)`). Both shapes share the same parameter-list
//! grammar, including nested parens for function-pointer parameters.

/// A C function signature split into spellings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionType {
    pub return_type: String,
    pub parameters: Vec<String>,
    pub is_variadic: bool,
}

/// Splits a signature spelling such as `int (int, char **)`.
///
/// Returns `None` when the spelling has no parameter list at all.
pub fn parse_signature(spelling: &str) -> Option<FunctionType> {
    let spelling = spelling.trim();
    let open = find_top_level(spelling, '(')?;
    let close = matching_paren(spelling, open)?;
    if close != spelling.len() - 1 {
        return None;
    }

    let return_type = spelling[..open].trim().to_string();
    let params = &spelling[open + 1..close];
    let (parameters, is_variadic) = split_parameters(params);

    Some(FunctionType {
        return_type,
        parameters,
        is_variadic,
    })
}

/// Splits a function-pointer spelling such as `void (*)(int, char *)`.
pub fn parse_function_pointer(spelling: &str) -> Option<FunctionType> {
    let spelling = spelling.trim();
    let marker = spelling.find("(*)")?;
    let return_type = spelling[..marker].trim().to_string();
    let rest = &spelling[marker + 3..];
    let rest = rest.trim();
    if !rest.starts_with('(') || !rest.ends_with(')') {
        return None;
    }
    let (parameters, is_variadic) = split_parameters(&rest[1..rest.len() - 1]);
    Some(FunctionType {
        return_type,
        parameters,
        is_variadic,
    })
}

fn find_top_level(s: &str, needle: char) -> Option<usize> {
    s.char_indices().find(|(_, c)| *c == needle).map(|(i, _)| i)
}

fn matching_paren(s: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in s.char_indices().skip(open) {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Splits the text between the outer parens at top-level commas.
fn split_parameters(params: &str) -> (Vec<String>, bool) {
    let params = params.trim();
    if params.is_empty() || params == "void" {
        return (Vec::new(), false);
    }

    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    for (i, c) in params.char_indices() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(params[start..i].trim().to_string());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(params[start..].trim().to_string());

    let is_variadic = parts.last().map(|p| p == "...").unwrap_or(false);
    if is_variadic {
        parts.pop();
    }
    (parts, is_variadic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_signature() {
        let sig = parse_signature("int (int, char **)").unwrap();
        assert_eq!(sig.return_type, "int");
        assert_eq!(sig.parameters, vec!["int", "char **"]);
        assert!(!sig.is_variadic);
    }

    #[test]
    fn void_parameter_list_is_empty() {
        let sig = parse_signature("int (void)").unwrap();
        assert!(sig.parameters.is_empty());
    }

    #[test]
    fn variadic_signature() {
        let sig = parse_signature("int (const char *, ...)").unwrap();
        assert_eq!(sig.parameters, vec!["const char *"]);
        assert!(sig.is_variadic);
    }

    #[test]
    fn function_pointer_parameter_does_not_split_the_list() {
        let sig = parse_signature("void (int (*)(int, int), int)").unwrap();
        assert_eq!(sig.parameters, vec!["int (*)(int, int)", "int"]);
    }

    #[test]
    fn function_pointer_spelling() {
        let sig = parse_function_pointer("void (*)(int, char *)").unwrap();
        assert_eq!(sig.return_type, "void");
        assert_eq!(sig.parameters, vec!["int", "char *"]);
    }

    #[test]
    fn no_parameter_list() {
        assert!(parse_signature("int").is_none());
    }
}
