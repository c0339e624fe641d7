//! Read-side path resolution
//!
//! Resolution walks the token list left to right. Keys descend one level.
//! A fan-out (`*`) token opens a group that spans up to its matching cancel
//! (`|`) or the end of the path; the group's tokens are resolved against
//! every element of the current value and the results are collected, in
//! iteration order, into a new list. After a cancel the remaining tokens
//! continue against that collected list.
//!
//! A flatten (`>`) token opens no group. It splices the members of every
//! iterable element into one combined list and the remaining tokens address
//! that list directly, so `a.>.0` is the first merged element.
//!
//! Inside a group, branches that resolve to nothing are omitted from the
//! collected list in non-strict mode. At the top level the same outcome
//! becomes `null`.

use crate::access;
use crate::path::{PathError, PathParser, PathResult, Token};
use crate::value::Value;
use std::borrow::Cow;

pub(crate) struct Resolver<'p> {
    tokens: &'p [Token],
    parser: &'p PathParser,
    strict: bool,
}

impl<'p> Resolver<'p> {
    pub(crate) fn new(tokens: &'p [Token], parser: &'p PathParser, strict: bool) -> Self {
        Self {
            tokens,
            parser,
            strict,
        }
    }

    /// Resolve the whole token list; `None` means nothing was found
    pub(crate) fn resolve_root(&self, root: &Value) -> PathResult<Option<Value>> {
        self.resolve(root, 0, self.tokens.len())
    }

    fn resolve(&self, current: &Value, pos: usize, end: usize) -> PathResult<Option<Value>> {
        if pos == end {
            return Ok(Some(current.clone()));
        }
        match &self.tokens[pos] {
            Token::Key(key) => {
                let child = access::get(current, key).ok().flatten();
                match child {
                    Some(Cow::Borrowed(child)) => self.resolve(child, pos + 1, end),
                    Some(Cow::Owned(child)) => self.resolve(&child, pos + 1, end),
                    None if self.strict => Err(PathError::not_exist(key, self.traveled(pos))),
                    None => Ok(None),
                }
            }
            Token::Wildcard => self.fan_out(current, pos, end),
            Token::Flatten => self.flatten(current, pos, end),
            // A cancel with no open group has nothing to close.
            Token::Cancel => self.resolve(current, pos + 1, end),
        }
    }

    fn fan_out(&self, current: &Value, pos: usize, end: usize) -> PathResult<Option<Value>> {
        let close = self.matching_cancel(pos, end);
        let group_end = close.unwrap_or(end);

        let members = match access::values(current) {
            Some(members) => members,
            None if self.strict => return Err(self.not_iterable(current, pos)),
            None => return Ok(None),
        };

        tracing::trace!(at = %self.traveled(pos), members = members.len(), "fanning out");

        let mut collected = Vec::with_capacity(members.len());
        for member in members {
            if let Some(branch) = self.resolve(member.as_ref(), pos + 1, group_end)? {
                collected.push(branch);
            }
        }

        let collected = Value::List(collected);
        match close {
            Some(cancel) => self.resolve(&collected, cancel + 1, end),
            None => Ok(Some(collected)),
        }
    }

    /// Merge one level of nesting, then keep resolving against the merged list
    fn flatten(&self, current: &Value, pos: usize, end: usize) -> PathResult<Option<Value>> {
        let members = match access::values(current) {
            Some(members) => members,
            None if self.strict => return Err(self.not_iterable(current, pos)),
            None => return Ok(None),
        };

        let mut combined = Vec::with_capacity(members.len());
        for member in members {
            match access::values(member.as_ref()) {
                Some(inner) => combined.extend(inner.into_iter().map(Cow::into_owned)),
                None if self.strict => return Err(self.not_iterable(member.as_ref(), pos + 1)),
                None => {}
            }
        }

        tracing::trace!(at = %self.traveled(pos), merged = combined.len(), "flattening");

        self.resolve(&Value::List(combined), pos + 1, end)
    }

    /// Index of the cancel closing the group opened at `open`
    fn matching_cancel(&self, open: usize, end: usize) -> Option<usize> {
        let mut depth = 0usize;
        for (offset, token) in self.tokens[open + 1..end].iter().enumerate() {
            if token.opens_group() {
                depth += 1;
            } else if *token == Token::Cancel {
                if depth == 0 {
                    return Some(open + 1 + offset);
                }
                depth -= 1;
            }
        }
        None
    }

    fn not_iterable(&self, value: &Value, pos: usize) -> PathError {
        PathError::PathNotArrayAccessible {
            traveled: self.traveled(pos),
            found: value.type_name(),
        }
    }

    fn traveled(&self, pos: usize) -> String {
        self.parser.join(&self.tokens[..pos])
    }
}
