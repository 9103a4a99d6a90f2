pub mod change;
pub mod commit;
pub mod history;
pub mod prompt;
pub mod release_notes;
pub mod version;
