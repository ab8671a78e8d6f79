//! dasm16 assembles DCPU-16 assembly source into a flat, big-endian
//! memory image. See [`assembler`] for the pipeline.
#[macro_use] extern crate log;
extern crate once_cell;
extern crate thiserror;

pub mod assembler;
