// User-facing macros
//
// - tag: #[derive(Tag)]
// - tuple: tuple_t!, tuple!
// - decls: decls!
// - combine: combine!

pub mod combine;
pub mod decls;
pub mod tag;
pub mod tuple;
