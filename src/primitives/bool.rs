//! Const-bool type selection.

/// Type-level boolean.
pub trait Bool: 'static {
    /// `Then` for true, `Else` for false.
    type If<Then, Else>;
}

pub struct True;

pub struct False;

impl Bool for True {
    type If<Then, Else> = Then;
}

impl Bool for False {
    type If<Then, Else> = Else;
}

/// Convert const bool to type-level Bool.
pub trait SelectBool<const B: bool> {
    type Out: Bool;
}

impl SelectBool<true> for () {
    type Out = True;
}

impl SelectBool<false> for () {
    type Out = False;
}

/// `T` when `C` holds, `E` otherwise.
pub type If<const C: bool, T, E> = <<() as SelectBool<C>>::Out as Bool>::If<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    struct A;
    struct B;

    fn name<T>() -> &'static str {
        core::any::type_name::<T>()
    }

    #[test]
    fn test_if_selects_branch() {
        assert_eq!(name::<If<true, A, B>>(), name::<A>());
        assert_eq!(name::<If<false, A, B>>(), name::<B>());
    }
}
