/// Surface form of a search query, used to pick per-field weights.
///
/// Classified on the normalized query before handle-normalization strips the
/// leading `@`. The variants are mutually exclusive; first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryShape {
    /// Starts with `@` — the caller is typing a messaging handle
    Handle,
    /// Contains `@` mid-string — looks like an email address
    Email,
    /// `first.last` pattern — an email local-part convention
    DottedName,
    /// Anything else — most likely a display name
    Plain,
}

/// Per-field weight triple selected by [`QueryShape`].
///
/// Weights act as score ceilings since the ranker fuses fields with `max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldWeights {
    pub name: f64,
    pub email: f64,
    pub handle: f64,
}

impl QueryShape {
    /// Classify a normalized query. Must run before the `@` is stripped for
    /// handle comparison, otherwise case 1 can never fire.
    pub fn classify(query: &str) -> Self {
        if query.starts_with('@') {
            QueryShape::Handle
        } else if query.contains('@') {
            QueryShape::Email
        } else if is_dotted_name(query) {
            QueryShape::DottedName
        } else {
            QueryShape::Plain
        }
    }

    pub fn weights(self) -> FieldWeights {
        match self {
            QueryShape::Handle => FieldWeights { name: 0.3, email: 0.3, handle: 1.0 },
            QueryShape::Email => FieldWeights { name: 0.3, email: 1.0, handle: 0.3 },
            QueryShape::DottedName => FieldWeights { name: 0.5, email: 1.0, handle: 0.5 },
            QueryShape::Plain => FieldWeights { name: 1.0, email: 0.7, handle: 0.7 },
        }
    }
}

/// One or more alphanumerics, a literal dot, one or more alphanumerics,
/// nothing else (`a.ivanova`).
fn is_dotted_name(query: &str) -> bool {
    let mut parts = query.splitn(2, '.');
    match (parts.next(), parts.next()) {
        (Some(local), Some(rest)) => {
            !local.is_empty()
                && !rest.is_empty()
                && !rest.contains('.')
                && local.chars().all(|c| c.is_ascii_alphanumeric())
                && rest.chars().all(|c| c.is_ascii_alphanumeric())
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_shape_wins_over_email() {
        // `@foo` contains `@` too; the handle check must come first
        assert_eq!(QueryShape::classify("@foo"), QueryShape::Handle);
        assert_eq!(QueryShape::classify("@a.ivanova"), QueryShape::Handle);
    }

    #[test]
    fn test_email_shape() {
        assert_eq!(QueryShape::classify("a.ivanova@example.com"), QueryShape::Email);
        assert_eq!(QueryShape::classify("b.petrov@"), QueryShape::Email);
    }

    #[test]
    fn test_dotted_name_shape() {
        assert_eq!(QueryShape::classify("a.ivanova"), QueryShape::DottedName);
        assert_eq!(QueryShape::classify("ab2.cd3"), QueryShape::DottedName);
    }

    #[test]
    fn test_dotted_name_rejects_extra_dots_and_symbols() {
        assert_eq!(QueryShape::classify("a.b.c"), QueryShape::Plain);
        assert_eq!(QueryShape::classify(".ivanova"), QueryShape::Plain);
        assert_eq!(QueryShape::classify("a.ivanova tail"), QueryShape::Plain);
        assert_eq!(QueryShape::classify("a-b.c"), QueryShape::Plain);
        assert_eq!(QueryShape::classify("alice"), QueryShape::Plain);
    }

    #[test]
    fn test_weights_per_shape() {
        assert_eq!(QueryShape::Handle.weights().handle, 1.0);
        assert_eq!(QueryShape::Email.weights().email, 1.0);
        assert_eq!(QueryShape::DottedName.weights().email, 1.0);
        assert_eq!(QueryShape::Plain.weights().name, 1.0);
    }
}
