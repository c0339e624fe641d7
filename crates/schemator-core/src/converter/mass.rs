//! Lazy conversion of many items with one schema

use super::{Schema, SchemaConverter};
use crate::error::Result;
use crate::value::Value;
use std::borrow::Borrow;
use std::iter::FusedIterator;

/// Iterator returned by [`SchemaConverter::convert_all`]
///
/// Each item is converted only when pulled. Cloning the iterator restarts
/// from the same position when the upstream iterator supports it.
#[derive(Clone)]
pub struct ConvertAll<'a, I> {
    converter: &'a SchemaConverter,
    schema: &'a Schema,
    items: I,
    strict: bool,
}

impl<'a, I> ConvertAll<'a, I> {
    pub(super) fn new(converter: &'a SchemaConverter, items: I, schema: &'a Schema, strict: bool) -> Self {
        Self {
            converter,
            schema,
            items,
            strict,
        }
    }
}

impl<I> Iterator for ConvertAll<'_, I>
where
    I: Iterator,
    I::Item: Borrow<Value>,
{
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.items.next()?;
        Some(self.converter.convert(item.borrow(), self.schema, self.strict))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

impl<I> ExactSizeIterator for ConvertAll<'_, I>
where
    I: ExactSizeIterator,
    I::Item: Borrow<Value>,
{
}

impl<I> FusedIterator for ConvertAll<'_, I>
where
    I: FusedIterator,
    I::Item: Borrow<Value>,
{
}
