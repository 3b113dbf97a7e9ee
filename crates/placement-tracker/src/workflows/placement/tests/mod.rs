mod accounts;
mod applications;
mod common;
mod internships;
