pub mod release_notes;
