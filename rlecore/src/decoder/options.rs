/// What to do with input left over after the top-level expression.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TrailingInput {
    #[default]
    Reject,
    Ignore,
}

/// Knobs for [`decompress_with`](super::decompress_with).
///
/// The defaults impose no nesting or size limit and reject trailing input.
#[readonly::make]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    pub max_depth: Option<usize>,
    pub max_output_len: Option<usize>,
    pub trailing: TrailingInput,
}

impl DecodeOptions {
    pub fn new() -> DecodeOptions {
        DecodeOptions::default()
    }

    /// Fail with `DepthLimitExceeded` once repeat groups nest deeper than `depth`.
    pub fn with_max_depth(mut self, depth: usize) -> DecodeOptions {
        self.max_depth = Some(depth);
        self
    }

    /// Fail with `OutputTooLarge` once the decoded string would exceed `len` bytes.
    pub fn with_max_output_len(mut self, len: usize) -> DecodeOptions {
        self.max_output_len = Some(len);
        self
    }

    pub fn with_trailing(mut self, trailing: TrailingInput) -> DecodeOptions {
        self.trailing = trailing;
        self
    }
}

#[cfg(test)]
mod test_options {
    use super::*;

    #[test]
    fn defaults_are_unbounded_and_strict() {
        let opts = DecodeOptions::new();

        assert_eq!(opts.max_depth, None);
        assert_eq!(opts.max_output_len, None);
        assert_eq!(opts.trailing, TrailingInput::Reject);
    }

    #[test]
    fn setters_chain() {
        let opts = DecodeOptions::new()
            .with_max_depth(8)
            .with_max_output_len(1024)
            .with_trailing(TrailingInput::Ignore);

        assert_eq!(opts.max_depth, Some(8));
        assert_eq!(opts.max_output_len, Some(1024));
        assert_eq!(opts.trailing, TrailingInput::Ignore);
    }
}
