mod common;
mod response;
mod scheduling;
