mod dump;
mod errors;
mod global;
mod queries;
mod utils;
