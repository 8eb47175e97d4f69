pub mod update_reaction;
pub mod viewer;
