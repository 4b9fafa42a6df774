pub mod drug;
