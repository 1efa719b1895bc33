use crate::core::config::TriplexConfig;
use crate::core::provider::{CompletionProvider, CompletionRequest};
use anyhow::Result;
use thiserror::Error;

pub mod triple;

pub use triple::{parse_triples, KnowledgeTriple};

macro_rules! kg_triple_delimiter {
    () => {
        "<|>"
    };
}

/// Separator between serialized triples, both in the few-shot examples and
/// in what the model is asked to produce.
pub const KG_TRIPLE_DELIMITER: &str = kg_triple_delimiter!();

pub const TEXT_PLACEHOLDER: &str = "{text}";

pub const KNOWLEDGE_TRIPLE_EXTRACTION_TEMPLATE: &str = concat!(
    "You are a networked intelligence helping a human track knowledge triples",
    " about all relevant people, things, concepts, etc. and integrating",
    " them with your knowledge stored within your weights",
    " as well as that stored in a knowledge graph.",
    " Extract all of the knowledge triples from the text.",
    " A knowledge triple is a clause that contains a subject, a predicate,",
    " and an object. The subject is the entity being described,",
    " the predicate is the property of the subject that is being",
    " described, and the object is the value of the property.\n\n",
    "EXAMPLE\n",
    "It's a state in the US. It's also the number 1 producer of gold in the US.\n\n",
    "Output: (Nevada, is a, state)",
    kg_triple_delimiter!(),
    "(Nevada, is in, US)",
    kg_triple_delimiter!(),
    "(Nevada, is the number 1 producer of, gold)\n",
    "END OF EXAMPLE\n\n",
    "EXAMPLE\n",
    "I'm going to the store.\n\n",
    "Output: NONE\n",
    "END OF EXAMPLE\n\n",
    "EXAMPLE\n",
    "Oh huh. I know Descartes likes to drive antique scooters and play the mandolin.\n",
    "Output: (Descartes, likes to drive, antique scooters)",
    kg_triple_delimiter!(),
    "(Descartes, plays, mandolin)\n",
    "END OF EXAMPLE\n\n",
    "EXAMPLE\n",
    "{text}",
    "Output:",
);

#[derive(Debug, Error, PartialEq)]
pub enum TemplateError {
    #[error("template has no {0} placeholder")]
    MissingPlaceholder(&'static str),
    #[error("template has {count} {placeholder} placeholders, expected one")]
    RepeatedPlaceholder {
        placeholder: &'static str,
        count: usize,
    },
}

/// A template with exactly one `{text}` slot, split once at construction.
///
/// Rendering is plain concatenation, so braces or delimiters inside the
/// caller's text are never interpreted.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptTemplate {
    head: String,
    tail: String,
}

impl PromptTemplate {
    pub fn new(template: &str) -> Result<Self, TemplateError> {
        let count = template.matches(TEXT_PLACEHOLDER).count();
        match count {
            0 => Err(TemplateError::MissingPlaceholder(TEXT_PLACEHOLDER)),
            1 => {
                let (head, tail) = template
                    .split_once(TEXT_PLACEHOLDER)
                    .ok_or(TemplateError::MissingPlaceholder(TEXT_PLACEHOLDER))?;
                Ok(Self {
                    head: head.to_string(),
                    tail: tail.to_string(),
                })
            }
            count => Err(TemplateError::RepeatedPlaceholder {
                placeholder: TEXT_PLACEHOLDER,
                count,
            }),
        }
    }

    pub fn render(&self, text: &str) -> String {
        let mut out = String::with_capacity(self.head.len() + text.len() + self.tail.len());
        out.push_str(&self.head);
        out.push_str(text);
        out.push_str(&self.tail);
        out
    }
}

/// Renders the extraction prompt and forwards it to a completion provider.
pub struct TripleExtractor<P: CompletionProvider> {
    provider: P,
    template: PromptTemplate,
    model: String,
    temperature: f64,
    max_tokens: u32,
}

impl<P: CompletionProvider> TripleExtractor<P> {
    pub fn new(provider: P, config: &TriplexConfig) -> Result<Self> {
        let template = PromptTemplate::new(KNOWLEDGE_TRIPLE_EXTRACTION_TEMPLATE)?;
        Ok(Self {
            provider,
            template,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn render(&self, text: &str) -> String {
        self.template.render(text)
    }

    pub fn request(&self, text: &str) -> CompletionRequest {
        CompletionRequest {
            model: self.model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            prompt: self.render(text),
        }
    }

    /// Returns the provider's text untouched. `NONE` and delimiters are not interpreted.
    pub async fn extract(&self, text: &str) -> Result<String> {
        let request = self.request(text);
        self.provider.complete(&request).await
    }
}
