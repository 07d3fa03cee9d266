//! Testing utilities for the ACE workspace
//!
//! Scripted providers and shared fixtures.

#![allow(missing_docs)]

use ace_model::{StylingIdiom, TargetComponent};
use ace_repo::{ContentAccessor, ProviderError, RepoModel, TextGenerator, ThemeTable};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::collections::VecDeque;

/// Install an env-filtered subscriber for test log output
///
/// Safe to call from every test; only the first call wins.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Text generator that replays a queued script of responses
///
/// Each `generate_text` call pops the next queued entry; an exhausted queue
/// is a generation failure. Prompts are recorded for assertions.
#[derive(Debug, Default)]
pub struct ScriptedGenerator {
    responses: Mutex<VecDeque<Result<String, String>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, text: impl Into<String>) -> Self {
        self.responses.lock().push_back(Ok(text.into()));
        self
    }

    pub fn fail(self, reason: impl Into<String>) -> Self {
        self.responses.lock().push_back(Err(reason.into()));
        self
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

#[async_trait::async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate_text(&self, prompt: &str) -> Result<String, ProviderError> {
        self.prompts.lock().push(prompt.to_string());
        match self.responses.lock().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(reason)) => Err(ProviderError::Generation(reason)),
            None => Err(ProviderError::Generation("script exhausted".to_string())),
        }
    }
}

/// In-memory path-to-content accessor
#[derive(Debug, Default)]
pub struct StaticAccessor {
    files: HashMap<String, String>,
}

impl StaticAccessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }
}

#[async_trait::async_trait]
impl ContentAccessor for StaticAccessor {
    async fn read(&self, path: &str) -> Result<String, ProviderError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| ProviderError::Read {
                path: path.to_string(),
                reason: "not in fixture set".to_string(),
            })
    }
}

/// A small utility-class component source used across engine tests
pub const BUTTON_SOURCE: &str = r#"import React from 'react';

interface ButtonProps {
    label: string;
    onClick: () => void;
}

export function Button({ label, onClick }: ButtonProps) {
    return (
        <button className="text-sm text-white bg-blue-500" onClick={onClick}>
            {label}
        </button>
    );
}
"#;

pub fn button_component() -> TargetComponent {
    TargetComponent::new("Button", "src/components/Button.tsx", StylingIdiom::UtilityClasses)
        .with_content(BUTTON_SOURCE)
}

pub fn sample_model() -> RepoModel {
    RepoModel::new()
        .with_theme(ThemeTable::with_defaults())
        .with_component(button_component())
        .with_component(
            TargetComponent::new(
                "Header",
                "src/components/Header.tsx",
                StylingIdiom::UtilityClasses,
            )
            .with_content(
                r#"import React from 'react';

export function Header() {
    return <header className="site-header text-xl">Acme</header>;
}
"#,
            ),
        )
        .with_selector(".cta-button", "Button")
        .with_selector(".site-header", "Header")
}
