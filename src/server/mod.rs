//! Server boundary: symbol table, message envelope, command handlers
//!
//! The network transport and wire parsing live in the embedding server;
//! this module starts where a request has become an argument map and ends
//! where a reply envelope goes back out.

mod commands;
mod message;
mod symtab;

pub use commands::{
    binopsv_msg, binopvs_msg, binopvv_msg, clip_msg, command_table, opeqvs_msg, opeqvv_msg,
    result_dtype, Handler,
};
pub use message::{MsgArgs, MsgType, Reply};
pub use symtab::SymbolTable;
