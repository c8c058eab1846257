pub mod inflect;
