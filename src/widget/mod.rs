pub mod halfblock;
