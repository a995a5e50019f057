use anyhow::{Result, anyhow};
use std::collections::HashMap;
use std::sync::Arc;
use swc_common::{
    BytePos, FileName, Globals, SourceMap, Spanned,
    comments::{Comment, SingleThreadedComments},
};
use swc_ecma_ast::Module;
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};

/// Map of byte positions to comments.
pub type CommentMap = HashMap<BytePos, Vec<Comment>>;

/// Leading comments extracted from SingleThreadedComments.
///
/// swc attaches every comment that precedes a token to that token's start
/// position. Only leading comments can form a doc block, so trailing ones
/// are not kept.
#[derive(Debug, Clone, Default)]
pub struct ExtractedComments {
    pub leading: CommentMap,
}

impl ExtractedComments {
    /// Extract comments from SingleThreadedComments.
    /// This must be called before SingleThreadedComments is dropped.
    pub fn from_swc(comments: &SingleThreadedComments) -> Self {
        let (leading, _trailing) = comments.borrow_all();
        Self {
            leading: leading.iter().map(|(k, v)| (*k, v.clone())).collect(),
        }
    }

    /// Comments attached to the token starting at `pos`, in source order.
    pub fn leading_at(&self, pos: BytePos) -> &[Comment] {
        self.leading.get(&pos).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The earliest group of leading comments in the file.
    pub fn first_leading(&self) -> &[Comment] {
        self.leading
            .iter()
            .min_by_key(|(pos, _)| **pos)
            .map(|(_, cmts)| cmts.as_slice())
            .unwrap_or(&[])
    }
}

pub struct ParsedSource {
    pub module: Module,
    pub source_map: Arc<SourceMap>,
    pub comments: ExtractedComments,
}

/// Parse TypeScript source code into an AST.
///
/// `.tsx` paths enable JSX syntax. Accepts a shared SourceMap; the
/// context gives each file its own so files can be parsed in parallel.
pub fn parse_ts_source(
    code: String,
    file_path: &str,
    source_map: Arc<SourceMap>,
) -> Result<ParsedSource> {
    use swc_common::GLOBALS;

    // Wrap in GLOBALS.set() for thread safety
    GLOBALS.set(&Globals::new(), || {
        let source_file = source_map.new_source_file(FileName::Real(file_path.into()).into(), code);

        let syntax = Syntax::Typescript(TsSyntax {
            tsx: file_path.ends_with(".tsx"),
            decorators: true,
            ..Default::default()
        });

        let comments = SingleThreadedComments::default();
        let mut parser = Parser::new(syntax, StringInput::from(&*source_file), Some(&comments));

        let module = parser.parse_module().map_err(|e| {
            let loc = source_map.lookup_char_pos(e.span().lo);
            anyhow!("Failed to parse at line {}: {}", loc.line, e.kind().msg())
        })?;

        // Extract comments immediately (before SingleThreadedComments drops)
        let extracted_comments = ExtractedComments::from_swc(&comments);

        Ok(ParsedSource {
            module,
            source_map,
            comments: extracted_comments,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Result<ParsedSource> {
        let source_map = Arc::new(SourceMap::default());
        parse_ts_source(source.to_string(), "test.ts", source_map)
    }

    #[test]
    fn test_parse_interface() {
        let parsed = parse("export interface A { x: string }").unwrap();
        assert_eq!(parsed.module.body.len(), 1);
        assert!(parsed.comments.leading.is_empty());
    }

    #[test]
    fn test_leading_comments_collected() {
        let parsed = parse("// @HttpClient\ninterface A {}\n").unwrap();
        let first = parsed.comments.first_leading();
        assert_eq!(first.len(), 1);
        assert_eq!(&*first[0].text, " @HttpClient");
    }

    #[test]
    fn test_parse_error_reports_line() {
        let err = parse("interface A {\n  x: \n").err().unwrap();
        assert!(err.to_string().contains("Failed to parse at line"));
    }

    #[test]
    fn test_tsx_enabled_by_extension() {
        let source_map = Arc::new(SourceMap::default());
        let parsed = parse_ts_source(
            "export const x = <div>hi</div>;".to_string(),
            "view.tsx",
            source_map,
        );
        assert!(parsed.is_ok());
    }
}
