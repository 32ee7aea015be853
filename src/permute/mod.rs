pub mod builder;
pub mod jigsaw;
pub mod perm;
