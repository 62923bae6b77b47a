/// HTML table lexer producing [`CellToken`](token::CellToken) streams.
pub mod lexer;
/// Cell token type shared by every token producer and the decoder.
pub mod token;
