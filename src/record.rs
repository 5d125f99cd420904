//! Records and how the engine obtains fresh ones.

/// A caller-defined entity materialized from one result row.
///
/// `FIELD_COUNT` must equal the number of columns the query returns; the engine checks it
/// before converting anything.
pub trait Record: Default {
    const FIELD_COUNT: usize;

    fn field_count(&self) -> usize {
        Self::FIELD_COUNT
    }
}

/// Element type of an output collection that can hand out a fresh, writable `R`.
///
/// Implemented for `R` itself (values) and `Box<R>` (owned pointers), so callers pick the
/// storage they want through the collection type alone:
///
/// ```rust
/// use sql_record_binder::prelude::*;
///
/// #[derive(Debug, Default)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl Record for Point {
///     const FIELD_COUNT: usize = 2;
/// }
///
/// let mut by_value = <Point as Holder<Point>>::make_instance();
/// by_value.record_mut().x = 1;
/// let mut boxed = <Box<Point> as Holder<Point>>::make_instance();
/// boxed.record_mut().y = 2;
/// assert_eq!((by_value.x, boxed.y), (1, 2));
/// ```
pub trait Holder<R: Record>: Sized {
    fn make_instance() -> Self;

    fn record_mut(&mut self) -> &mut R;
}

impl<R: Record> Holder<R> for R {
    fn make_instance() -> Self {
        R::default()
    }

    fn record_mut(&mut self) -> &mut R {
        self
    }
}

impl<R: Record> Holder<R> for Box<R> {
    fn make_instance() -> Self {
        Box::default()
    }

    fn record_mut(&mut self) -> &mut R {
        self.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Pair {
        id: i64,
        name: String,
    }

    impl Record for Pair {
        const FIELD_COUNT: usize = 2;
    }

    fn fill<C: Holder<Pair>>() -> C {
        let mut inst = C::make_instance();
        let rec = inst.record_mut();
        rec.id = 7;
        rec.name.push('x');
        inst
    }

    #[test]
    fn value_and_boxed_paths_start_default() {
        let v = <Pair as Holder<Pair>>::make_instance();
        assert_eq!(v, Pair::default());
        let b = <Box<Pair> as Holder<Pair>>::make_instance();
        assert_eq!(*b, Pair::default());
        assert_eq!(b.field_count(), 2);
    }

    #[test]
    fn both_paths_are_writable() {
        let v: Pair = fill();
        let b: Box<Pair> = fill();
        assert_eq!(v, *b);
        assert_eq!(v.name, "x");
    }
}
