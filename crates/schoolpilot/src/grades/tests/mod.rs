mod calculate;
mod common;
