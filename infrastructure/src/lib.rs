pub mod completion;
pub mod config;
pub mod embedder;
pub mod input_loader;
pub mod ollama_client;
pub mod openrouter_client;
pub mod search;
