// Guide chat flow: request validation, knowledge lookup, prompt
// composition, completion call. All outbound LLM traffic goes through
// llm_client; no direct HTTP calls here.

pub mod composer;
pub mod handlers;
pub mod models;
pub mod prompts;
