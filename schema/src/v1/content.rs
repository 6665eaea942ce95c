//! The recursive `Content` tree: dispatch nodes and terminal values.
//!
//! Each composite node validates its local invariants in its constructor, and
//! its children are already-constructed (hence already-valid) `Content`
//! values, so a successfully built node is valid for its whole subtree.
//!
//! # Flattening convention
//!
//! `MultiBinning::content` is the row-major linearization of the N-dimensional
//! bin grid: the first-listed axis varies slowest and the last-listed axis
//! fastest. For axes with `n_0, n_1, ..., n_{d-1}` bins the bin
//! `(i_0, i_1, ..., i_{d-1})` lives at
//! `((i_0 * n_1 + i_1) * n_2 + i_2) ... * n_{d-1} + i_{d-1}`.
//! [`MultiBinning::flat_index`] and [`MultiBinning::bin_indices`] are the only
//! implementation of this rule.

use std::collections::HashSet;
use std::fmt;

use crate::error::{ErrorKind, SchemaError};
use crate::v1::variable::Formula;

/// A terminal node: a formula or a constant.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A parametrized expression.
    Formula(Formula),
    /// A constant. Must be finite.
    Number(f64),
}

/// A function of the remaining inputs: further dispatch, or a terminal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    /// 1-D piecewise-by-threshold dispatch.
    Binning(Binning),
    /// N-D rectangular piecewise-by-threshold dispatch.
    MultiBinning(MultiBinning),
    /// Dispatch on a discrete key.
    Category(Category),
    /// Terminal value.
    Value(Value),
}

impl From<f64> for Content {
    fn from(value: f64) -> Self {
        Content::Value(Value::Number(value))
    }
}

impl From<Formula> for Content {
    fn from(formula: Formula) -> Self {
        Content::Value(Value::Formula(formula))
    }
}

impl From<Binning> for Content {
    fn from(binning: Binning) -> Self {
        Content::Binning(binning)
    }
}

impl From<MultiBinning> for Content {
    fn from(binning: MultiBinning) -> Self {
        Content::MultiBinning(binning)
    }
}

impl From<Category> for Content {
    fn from(category: Category) -> Self {
        Content::Category(category)
    }
}

impl Content {
    /// The `nodetype` discriminator of this node, `None` for terminal values.
    #[must_use]
    pub fn nodetype(&self) -> Option<&'static str> {
        match self {
            Content::Binning(_) => Some("binning"),
            Content::MultiBinning(_) => Some("multibinning"),
            Content::Category(_) => Some("category"),
            Content::Value(_) => None,
        }
    }

    /// Direct children, in wire order; a category's default comes last.
    pub fn children(&self) -> impl Iterator<Item = &Content> + '_ {
        let (content, default): (&[Content], Option<&Content>) = match self {
            Content::Binning(b) => (b.content.as_slice(), None),
            Content::MultiBinning(m) => (m.content.as_slice(), None),
            Content::Category(c) => (c.content.as_slice(), c.default.as_deref()),
            Content::Value(_) => (&[] as &[Content], None),
        };
        content.iter().chain(default)
    }

    /// Calls `visit` on this node and every descendant, parents first.
    pub fn for_each_node<'a>(&'a self, visit: &mut impl FnMut(&'a Content)) {
        visit(self);
        for child in self.children() {
            child.for_each_node(visit);
        }
    }

    /// Total number of nodes in this subtree, including this one.
    #[must_use]
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        self.for_each_node(&mut |_| count += 1);
        count
    }

    /// Length of the longest root-to-leaf path, counting nodes.
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self.children().map(Content::depth).max().unwrap_or(0)
    }

    /// Names of the inputs this subtree dispatches on, in first-use order.
    #[must_use]
    pub fn inputs_used(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        self.for_each_node(&mut |node| {
            let names: &[String] = match node {
                Content::Binning(b) => std::slice::from_ref(&b.input),
                Content::MultiBinning(m) => m.inputs.as_slice(),
                Content::Category(c) => std::slice::from_ref(&c.input),
                Content::Value(_) => &[] as &[String],
            };
            for name in names {
                if !seen.contains(&name.as_str()) {
                    seen.push(name.as_str());
                }
            }
        });
        seen
    }
}

/// Checks one axis: at least two edges, all finite, strictly increasing.
pub(crate) fn check_axis(edges: &[f64]) -> Result<(), SchemaError> {
    if edges.len() < 2 {
        return Err(SchemaError::new(ErrorKind::TooFewEdges { found: edges.len() }));
    }
    if let Some(&value) = edges.iter().find(|e| !e.is_finite()) {
        return Err(SchemaError::new(ErrorKind::NonFiniteNumber { value }));
    }
    if edges.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err(SchemaError::new(ErrorKind::EdgeOrder {
            edges: edges.to_vec(),
        }));
    }
    Ok(())
}

/// Checks every axis in order, then that there is one axis per input.
pub(crate) fn check_axes(inputs: usize, edges: &[Vec<f64>]) -> Result<(), SchemaError> {
    for (k, axis) in edges.iter().enumerate() {
        check_axis(axis).map_err(|e| e.in_index(k))?;
    }
    if edges.len() != inputs {
        return Err(SchemaError::new(ErrorKind::AxisCountMismatch {
            edges: edges.len(),
            inputs,
        }));
    }
    Ok(())
}

/// Rejects a non-finite constant leaf.
pub(crate) fn check_leaf(content: &Content) -> Result<(), SchemaError> {
    match content {
        Content::Value(Value::Number(value)) if !value.is_finite() => {
            Err(SchemaError::new(ErrorKind::NonFiniteNumber { value: *value }))
        }
        _ => Ok(()),
    }
}

fn check_leaves(content: &[Content]) -> Result<(), SchemaError> {
    for (i, child) in content.iter().enumerate() {
        check_leaf(child).map_err(|e| e.in_index(i))?;
    }
    Ok(())
}

fn check_count(expected: usize, content: &[Content]) -> Result<(), SchemaError> {
    if content.len() != expected {
        return Err(SchemaError::new(ErrorKind::ContentCountMismatch {
            expected,
            found: content.len(),
        }));
    }
    Ok(())
}

/// Bin of `x` on a validated axis; bins are half-open `[lo, hi)`.
fn locate(edges: &[f64], x: f64) -> Option<usize> {
    let (first, last) = (*edges.first()?, *edges.last()?);
    if !(x >= first && x < last) {
        return None;
    }
    Some(edges.partition_point(|&edge| edge <= x) - 1)
}

/// 1-D piecewise-by-threshold node.
///
/// Bin `i` covers `[edges[i], edges[i+1])` and maps to `content[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Binning {
    input: String,
    edges: Vec<f64>,
    content: Vec<Content>,
}

impl Binning {
    /// Builds a binning node.
    ///
    /// Checks, in order: at least two edges, edges finite, edges strictly
    /// increasing, one content entry per bin, constant entries finite.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant, located at `edges` or `content`.
    pub fn new(
        input: impl Into<String>,
        edges: Vec<f64>,
        content: Vec<Content>,
    ) -> Result<Self, SchemaError> {
        check_axis(&edges).map_err(|e| e.in_field("edges"))?;
        check_count(edges.len() - 1, &content).map_err(|e| e.in_field("content"))?;
        check_leaves(&content).map_err(|e| e.in_field("content"))?;
        Ok(Self {
            input: input.into(),
            edges,
            content,
        })
    }

    /// Name of the input this node dispatches on.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Bin edges, strictly increasing.
    #[must_use]
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// One entry per bin.
    #[must_use]
    pub fn content(&self) -> &[Content] {
        &self.content
    }

    /// Number of bins.
    #[must_use]
    pub fn bin_count(&self) -> usize {
        self.content.len()
    }

    /// Index of the bin containing `x`, or `None` outside `[edges[0], edges[m])`.
    #[must_use]
    pub fn bin_index(&self, x: f64) -> Option<usize> {
        locate(&self.edges, x)
    }
}

/// N-D rectangular piecewise-by-threshold node.
///
/// `content` is flattened with the first-listed axis varying slowest; see the
/// module documentation.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiBinning {
    inputs: Vec<String>,
    edges: Vec<Vec<f64>>,
    content: Vec<Content>,
}

impl MultiBinning {
    /// Builds a multi-binning node.
    ///
    /// Checks, in order: every axis (at least two finite, strictly increasing
    /// edges), one edge list per input, one content entry per grid cell,
    /// constant entries finite.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant, located at `edges[k]`, `edges`
    /// or `content`.
    pub fn new(
        inputs: Vec<String>,
        edges: Vec<Vec<f64>>,
        content: Vec<Content>,
    ) -> Result<Self, SchemaError> {
        check_axes(inputs.len(), &edges).map_err(|e| e.in_field("edges"))?;
        let expected = edges
            .iter()
            .fold(1usize, |acc, axis| acc.saturating_mul(axis.len() - 1));
        check_count(expected, &content).map_err(|e| e.in_field("content"))?;
        check_leaves(&content).map_err(|e| e.in_field("content"))?;
        Ok(Self {
            inputs,
            edges,
            content,
        })
    }

    /// Names of the inputs, one per axis.
    #[must_use]
    pub fn inputs(&self) -> &[String] {
        &self.inputs
    }

    /// Edge list of every axis.
    #[must_use]
    pub fn edges(&self) -> &[Vec<f64>] {
        &self.edges
    }

    /// Flattened grid content.
    #[must_use]
    pub fn content(&self) -> &[Content] {
        &self.content
    }

    /// Number of bins along each axis.
    #[must_use]
    pub fn shape(&self) -> Vec<usize> {
        self.edges.iter().map(|axis| axis.len() - 1).collect()
    }

    /// Flat position of the grid cell with per-axis bin `indices`.
    ///
    /// Returns `None` if the number of indices differs from the number of
    /// axes or an index is out of range.
    #[must_use]
    pub fn flat_index(&self, indices: &[usize]) -> Option<usize> {
        if indices.len() != self.edges.len() {
            return None;
        }
        let mut flat = 0usize;
        for (axis, &i) in self.edges.iter().zip(indices) {
            let bins = axis.len() - 1;
            if i >= bins {
                return None;
            }
            flat = flat * bins + i;
        }
        Some(flat)
    }

    /// Per-axis bin indices of the flat position `flat`; inverse of
    /// [`MultiBinning::flat_index`].
    #[must_use]
    pub fn bin_indices(&self, flat: usize) -> Option<Vec<usize>> {
        if flat >= self.content.len() {
            return None;
        }
        let mut rest = flat;
        let mut indices = vec![0; self.edges.len()];
        for (slot, axis) in indices.iter_mut().zip(&self.edges).rev() {
            let bins = axis.len() - 1;
            *slot = rest % bins;
            rest /= bins;
        }
        Some(indices)
    }

    /// Flat position of the cell containing the point `values` (one per axis).
    #[must_use]
    pub fn locate(&self, values: &[f64]) -> Option<usize> {
        if values.len() != self.edges.len() {
            return None;
        }
        let indices = self
            .edges
            .iter()
            .zip(values)
            .map(|(axis, &x)| locate(axis, x))
            .collect::<Option<Vec<_>>>()?;
        self.flat_index(&indices)
    }
}

/// A category key: a string or an integer.
///
/// `Str("1")` and `Int(1)` are distinct keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CategoryKey {
    /// A string key.
    Str(String),
    /// An integer key.
    Int(i64),
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryKey::Str(s) => write!(f, "{s:?}"),
            CategoryKey::Int(i) => write!(f, "{i}"),
        }
    }
}

impl From<&str> for CategoryKey {
    fn from(key: &str) -> Self {
        CategoryKey::Str(key.to_owned())
    }
}

impl From<String> for CategoryKey {
    fn from(key: String) -> Self {
        CategoryKey::Str(key)
    }
}

impl From<i64> for CategoryKey {
    fn from(key: i64) -> Self {
        CategoryKey::Int(key)
    }
}

/// Dispatch on a discrete key, with an optional fallback.
///
/// `keys[i]` maps to `content[i]`; `default` serves every other key and is
/// not counted against `keys`.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    input: String,
    keys: Vec<CategoryKey>,
    content: Vec<Content>,
    default: Option<Box<Content>>,
}

impl Category {
    /// Builds a category node.
    ///
    /// Checks, in order: no duplicate keys, one content entry per key,
    /// constant entries finite (content first, then the default).
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant, located at `keys[i]`,
    /// `content` or `default`.
    pub fn new(
        input: impl Into<String>,
        keys: Vec<CategoryKey>,
        content: Vec<Content>,
        default: Option<Content>,
    ) -> Result<Self, SchemaError> {
        check_unique_keys(&keys).map_err(|e| e.in_field("keys"))?;
        check_count(keys.len(), &content).map_err(|e| e.in_field("content"))?;
        check_leaves(&content).map_err(|e| e.in_field("content"))?;
        if let Some(default) = &default {
            check_leaf(default).map_err(|e| e.in_field("default"))?;
        }
        Ok(Self {
            input: input.into(),
            keys,
            content,
            default: default.map(Box::new),
        })
    }

    /// Name of the input this node dispatches on.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Keys, in positional correspondence with [`Category::content`].
    #[must_use]
    pub fn keys(&self) -> &[CategoryKey] {
        &self.keys
    }

    /// One entry per key.
    #[must_use]
    pub fn content(&self) -> &[Content] {
        &self.content
    }

    /// Fallback for keys not listed.
    #[must_use]
    pub fn default(&self) -> Option<&Content> {
        self.default.as_deref()
    }

    /// Content for `key`, falling back to the default.
    #[must_use]
    pub fn get(&self, key: &CategoryKey) -> Option<&Content> {
        match self.keys.iter().position(|k| k == key) {
            Some(i) => self.content.get(i),
            None => self.default(),
        }
    }
}

pub(crate) fn check_unique_keys(keys: &[CategoryKey]) -> Result<(), SchemaError> {
    let mut seen = HashSet::with_capacity(keys.len());
    for (i, key) in keys.iter().enumerate() {
        if !seen.insert(key) {
            return Err(
                SchemaError::new(ErrorKind::DuplicateKey { key: key.clone() }).in_index(i),
            );
        }
    }
    Ok(())
}
