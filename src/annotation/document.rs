//! Annotated instruction document.

use serde::{Deserialize, Serialize};

use super::{DepRel, Pos, Token};
use crate::model::TokenRange;
use crate::{Error, Result};

/// Sentences of tokens with a dependency tree per sentence.
///
/// All indices are document-global. Construction validates every index, so
/// accessors index directly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    tokens: Vec<Token>,
    sentences: Vec<TokenRange>,
}

#[derive(Deserialize)]
struct RawDocument {
    tokens: Vec<Token>,
    #[serde(default)]
    sentences: Vec<TokenRange>,
}

impl Document {
    /// Validate and index an annotation.
    ///
    /// With no sentence ranges the whole token list is one sentence.
    pub fn new(mut tokens: Vec<Token>, mut sentences: Vec<TokenRange>) -> Result<Self> {
        let len = tokens.len();
        if sentences.is_empty() && len > 0 {
            sentences.push(TokenRange::new(0, len));
        }

        let mut prev_end = 0;
        for s in &sentences {
            if s.start < prev_end || s.end > len || s.start > s.end {
                return Err(Error::InvalidAnnotation(format!(
                    "sentence [{}, {}) out of order or outside {len} tokens",
                    s.start, s.end
                )));
            }
            prev_end = s.end;
        }

        for (i, token) in tokens.iter().enumerate() {
            if token.head >= len {
                return Err(Error::InvalidAnnotation(format!(
                    "token {i} ({:?}) has head {} outside {len} tokens",
                    token.text, token.head
                )));
            }
        }

        for token in &mut tokens {
            token.children.clear();
        }
        for i in 0..len {
            let head = tokens[i].head;
            if head != i {
                tokens[head].children.push(i);
            }
        }

        Ok(Self { tokens, sentences })
    }

    /// Document with no tokens.
    pub fn empty() -> Self {
        Self {
            tokens: Vec::new(),
            sentences: Vec::new(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawDocument = serde_json::from_str(json)?;
        Self::new(raw.tokens, raw.sentences)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn sentences(&self) -> &[TokenRange] {
        &self.sentences
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn token(&self, i: usize) -> &Token {
        &self.tokens[i]
    }

    pub fn get(&self, i: usize) -> Option<&Token> {
        self.tokens.get(i)
    }

    /// Children of `i` bearing relation `dep`, in text order.
    pub fn children_with(&self, i: usize, dep: DepRel) -> impl Iterator<Item = usize> + '_ {
        self.tokens[i]
            .children
            .iter()
            .copied()
            .filter(move |&c| self.tokens[c].dep == dep)
    }

    /// Number of head hops from `i` to its sentence root.
    pub fn depth(&self, i: usize) -> usize {
        let mut current = i;
        let mut hops = 0;
        while self.tokens[current].head != current && hops <= self.tokens.len() {
            current = self.tokens[current].head;
            hops += 1;
        }
        hops
    }

    /// Grammatical root of a span: the highest token whose head lies outside
    /// the span (or is itself). Ties go to the leftmost token.
    pub fn span_root(&self, span: TokenRange) -> Option<usize> {
        (span.start..span.end)
            .filter(|&i| {
                let head = self.tokens[i].head;
                head == i || !span.contains(head)
            })
            .min_by_key(|&i| (self.depth(i), i))
    }

    /// Leftmost and rightmost token of the subtree rooted at `i`.
    pub fn subtree_edges(&self, i: usize) -> TokenRange {
        let (mut left, mut right) = (i, i);
        let mut stack = vec![i];
        while let Some(current) = stack.pop() {
            left = left.min(current);
            right = right.max(current);
            stack.extend(self.tokens[current].children.iter().copied());
        }
        TokenRange::new(left, right + 1)
    }

    /// Surface text of a span, with punctuation attached to the previous word.
    pub fn span_text(&self, span: TokenRange) -> String {
        let mut out = String::new();
        for token in &self.tokens[span.start..span.end.min(self.tokens.len())] {
            if !out.is_empty() && token.pos != Pos::Punct {
                out.push(' ');
            }
            out.push_str(&token.text);
        }
        out
    }
}

/// Incremental construction with sentence-relative head offsets.
///
/// ```
/// use recipe_graph::annotation::{DepRel, DocumentBuilder, Pos};
///
/// let doc = DocumentBuilder::new()
///     .sentence(&[
///         ("Chop", "chop", Pos::Verb, "VB", DepRel::Root, 0),
///         ("onions", "onion", Pos::Noun, "NNS", DepRel::Dobj, 0),
///     ])
///     .build()
///     .unwrap();
/// assert_eq!(doc.token(0).children, vec![1]);
/// ```
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    tokens: Vec<Token>,
    sentences: Vec<TokenRange>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sentence of `(text, lemma, pos, tag, dep, head)` tuples, where
    /// `head` is an index within this sentence.
    pub fn sentence(mut self, tokens: &[(&str, &str, Pos, &str, DepRel, usize)]) -> Self {
        let start = self.tokens.len();
        for &(text, lemma, pos, tag, dep, head) in tokens {
            self.tokens.push(Token::new(text, lemma, pos, tag, dep, start + head));
        }
        self.sentences.push(TokenRange::new(start, self.tokens.len()));
        self
    }

    pub fn build(self) -> Result<Document> {
        Document::new(self.tokens, self.sentences)
    }
}
