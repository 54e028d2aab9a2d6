//! Type-level lists of tables, used to check at compile time that an
//! expression only references tables a query actually reads from.

use core::marker::PhantomData;

/// Empty type-level set/list.
pub struct Nil;

/// Non-empty type-level set/list node.
pub struct Cons<Head, Tail>(PhantomData<(Head, Tail)>);

/// A type-level set/list of tables.
pub trait TypeSet {
    /// `Self` followed by every element of `Rhs`.
    type Append<Rhs: TypeSet>: TypeSet;
}

impl TypeSet for Nil {
    type Append<Rhs: TypeSet> = Rhs;
}

impl<Head, Tail> TypeSet for Cons<Head, Tail>
where
    Tail: TypeSet,
{
    type Append<Rhs: TypeSet> = Cons<Head, Tail::Append<Rhs>>;
}

/// Type-level concatenation.
pub type Concat<Lhs, Rhs> = <Lhs as TypeSet>::Append<Rhs>;

/// Witness: the element was found at the head of the list.
pub struct Here;

/// Witness: the element was found deeper in the list.
pub struct There<W>(PhantomData<W>);

/// Type-level search for `T` in a list.
///
/// The witness `W` is inferred by the compiler; it is unique as long as
/// `T` appears once in the list.
#[diagnostic::on_unimplemented(
    message = "table `{T}` is not part of this query",
    label = "add it with a join before referencing its columns"
)]
pub trait Contains<T, Witness> {}

impl<T, Tail> Contains<T, Here> for Cons<T, Tail> {}

impl<T, Head, Tail, W> Contains<T, There<W>> for Cons<Head, Tail> where Tail: Contains<T, W> {}

/// Every element of `Self` is contained in `Set`.
#[diagnostic::on_unimplemented(
    message = "expression references a table that is not part of this query",
    label = "every column must belong to the FROM table or a joined table"
)]
pub trait SubsetOf<Set, Witnesses> {}

impl<Set> SubsetOf<Set, Nil> for Nil {}

impl<Head, Tail, Set, W, Ws> SubsetOf<Set, Cons<W, Ws>> for Cons<Head, Tail>
where
    Set: Contains<Head, W>,
    Tail: SubsetOf<Set, Ws>,
{
}
