#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Boolean specification algebra.
//!
//! A [`Specification`] is an immutable predicate tree over a candidate `C`.
//! Leaves are arbitrary [`Predicate`] implementations; internal nodes combine
//! them with conjunction, disjunction, exclusive-or and negation.
//!
//! Trees are built once (typically at startup, when policies are defined) and
//! evaluated many times. Leaves are reference counted so cloning a tree is
//! cheap and the same tree can be shared across threads.
//!
//! ```
//! use authkit_spec::Specification;
//!
//! let adult = Specification::from_fn("adult", |age: &u32| *age >= 18);
//! let senior = Specification::from_fn("senior", |age: &u32| *age >= 65);
//!
//! let working_age = adult.and(senior.invert());
//! assert!(working_age.is_satisfied_by(&30));
//! assert!(!working_age.is_satisfied_by(&70));
//! assert_eq!(working_age.to_string(), "(adult & !senior)");
//! ```

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

pub mod error;

pub use error::SpecError;

/// An atomic condition a candidate either satisfies or not.
///
/// `Display` is used to render explanations, so it should be short and
/// stable (for example `perm:edit`).
pub trait Predicate<C: ?Sized>: fmt::Display + Send + Sync {
    fn is_satisfied_by(&self, candidate: &C) -> bool;
}

/// Composable predicate tree.
pub enum Specification<C: ?Sized> {
    /// A single predicate.
    Leaf(Arc<dyn Predicate<C>>),
    /// Satisfied when every child is satisfied.
    And(Composite<C>),
    /// Satisfied when at least one child is satisfied.
    Or(Composite<C>),
    /// Logical negation.
    Invert(Box<Specification<C>>),
    /// Satisfied when exactly one side is satisfied.
    Xor(Box<Specification<C>>, Box<Specification<C>>),
}

/// Children of an `And`/`Or` node. Never empty.
///
/// Only obtainable through the combinators or [`Composite::new`], so an empty
/// composite cannot be spelled out by hand:
///
/// ```compile_fail
/// use authkit_spec::{Composite, Specification};
///
/// let empty: Specification<u32> = Specification::And(Composite(Vec::new()));
/// ```
pub struct Composite<C: ?Sized>(Vec<Specification<C>>);

impl<C: ?Sized> Composite<C> {
    /// `None` when `children` is empty.
    #[must_use]
    pub fn new(children: Vec<Specification<C>>) -> Option<Self> {
        (!children.is_empty()).then_some(Self(children))
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Specification<C>] {
        &self.0
    }
}

impl<C: ?Sized> Deref for Composite<C> {
    type Target = [Specification<C>];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<C: ?Sized> Clone for Composite<C> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<C: ?Sized> Specification<C> {
    /// Wrap a predicate into a leaf node.
    #[must_use]
    pub fn leaf<P>(predicate: P) -> Self
    where
        P: Predicate<C> + 'static,
    {
        Self::Leaf(Arc::new(predicate))
    }

    /// Build a leaf from a closure. `label` is what `Display` prints.
    #[must_use]
    pub fn from_fn<F>(label: impl Into<String>, f: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        Self::Leaf(Arc::new(FnPredicate {
            label: label.into(),
            f,
        }))
    }

    /// Conjunction. Nested `And` nodes on either side are merged into one
    /// child list, so combining in a loop keeps the tree flat.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        let mut children = match self {
            Self::And(children) => children.0,
            spec => vec![spec],
        };
        match other {
            Self::And(rest) => children.extend(rest.0),
            spec => children.push(spec),
        }
        Self::And(Composite(children))
    }

    /// Disjunction. Flattens nested `Or` nodes the same way [`Self::and`] does.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        let mut children = match self {
            Self::Or(children) => children.0,
            spec => vec![spec],
        };
        match other {
            Self::Or(rest) => children.extend(rest.0),
            spec => children.push(spec),
        }
        Self::Or(Composite(children))
    }

    /// Exclusive or of exactly two specifications.
    #[must_use]
    pub fn xor(self, other: Self) -> Self {
        Self::Xor(Box::new(self), Box::new(other))
    }

    /// Logical negation.
    #[must_use]
    pub fn invert(self) -> Self {
        Self::Invert(Box::new(self))
    }

    /// Evaluate the tree against `candidate`.
    ///
    /// Predicates are assumed to be side-effect free, so `And` stops at the
    /// first failing child and `Or` at the first passing one.
    pub fn is_satisfied_by(&self, candidate: &C) -> bool {
        match self {
            Self::Leaf(predicate) => predicate.is_satisfied_by(candidate),
            Self::And(children) => children.iter().all(|spec| spec.is_satisfied_by(candidate)),
            Self::Or(children) => children.iter().any(|spec| spec.is_satisfied_by(candidate)),
            Self::Invert(spec) => !spec.is_satisfied_by(candidate),
            Self::Xor(left, right) => {
                left.is_satisfied_by(candidate) ^ right.is_satisfied_by(candidate)
            }
        }
    }

    /// What would still have to hold for `candidate` to satisfy this tree.
    ///
    /// Returns `None` when the candidate already satisfies it. Only `And`
    /// narrows the answer:
    /// - one failing child: that child;
    /// - every child failing: the `And` itself;
    /// - otherwise: a new `And` over the failing children, in order.
    ///
    /// Every other node returns itself when unsatisfied.
    #[must_use]
    pub fn remainder_unsatisfied_by(&self, candidate: &C) -> Option<Self> {
        let Self::And(children) = self else {
            return (!self.is_satisfied_by(candidate)).then(|| self.clone());
        };

        let mut failing: Vec<&Self> = children
            .iter()
            .filter(|spec| !spec.is_satisfied_by(candidate))
            .collect();

        match failing.len() {
            0 => None,
            1 => failing.pop().cloned(),
            n if n == children.len() => Some(self.clone()),
            _ => Some(Self::And(Composite(failing.into_iter().cloned().collect()))),
        }
    }

    /// Direct children of an `And`/`Or` node; empty for every other node.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match self {
            Self::And(children) | Self::Or(children) => children.as_slice(),
            Self::Leaf(_) | Self::Invert(_) | Self::Xor(..) => &[],
        }
    }
}

/// Conjunction of all `specs`.
///
/// A single spec is returned unchanged.
///
/// # Errors
///
/// Returns [`SpecError::EmptyComposite`] when `specs` is empty: an empty
/// conjunction is not a policy anyone means to write.
pub fn and_<C: ?Sized>(
    specs: impl IntoIterator<Item = Specification<C>>,
) -> Result<Specification<C>, SpecError> {
    specs
        .into_iter()
        .reduce(Specification::and)
        .ok_or(SpecError::EmptyComposite { op: "and" })
}

/// Disjunction of all `specs`.
///
/// # Errors
///
/// Returns [`SpecError::EmptyComposite`] when `specs` is empty.
pub fn or_<C: ?Sized>(
    specs: impl IntoIterator<Item = Specification<C>>,
) -> Result<Specification<C>, SpecError> {
    specs
        .into_iter()
        .reduce(Specification::or)
        .ok_or(SpecError::EmptyComposite { op: "or" })
}

#[must_use]
pub fn not_<C: ?Sized>(spec: Specification<C>) -> Specification<C> {
    spec.invert()
}

#[must_use]
pub fn xor_<C: ?Sized>(left: Specification<C>, right: Specification<C>) -> Specification<C> {
    left.xor(right)
}

impl<C: ?Sized> Clone for Specification<C> {
    fn clone(&self) -> Self {
        match self {
            Self::Leaf(predicate) => Self::Leaf(Arc::clone(predicate)),
            Self::And(children) => Self::And(children.clone()),
            Self::Or(children) => Self::Or(children.clone()),
            Self::Invert(spec) => Self::Invert(spec.clone()),
            Self::Xor(left, right) => Self::Xor(left.clone(), right.clone()),
        }
    }
}

impl<C: ?Sized> fmt::Display for Specification<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf(predicate) => write!(f, "{predicate}"),
            Self::And(children) => write_joined(f, children.as_slice(), " & "),
            Self::Or(children) => write_joined(f, children.as_slice(), " | "),
            Self::Invert(spec) => write!(f, "!{spec}"),
            Self::Xor(left, right) => write!(f, "({left} ^ {right})"),
        }
    }
}

impl<C: ?Sized> fmt::Debug for Specification<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Specification({self})")
    }
}

fn write_joined<C: ?Sized>(
    f: &mut fmt::Formatter<'_>,
    children: &[Specification<C>],
    sep: &str,
) -> fmt::Result {
    f.write_str("(")?;
    for (i, spec) in children.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{spec}")?;
    }
    f.write_str(")")
}

struct FnPredicate<F> {
    label: String,
    f: F,
}

impl<C: ?Sized, F> Predicate<C> for FnPredicate<F>
where
    F: Fn(&C) -> bool + Send + Sync,
{
    fn is_satisfied_by(&self, candidate: &C) -> bool {
        (self.f)(candidate)
    }
}

impl<F> fmt::Display for FnPredicate<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}
