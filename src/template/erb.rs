// nise-rs: Director-less BOSH Release Installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! ERB-style tag evaluation.
//!
//! ```text
//! <%= spec.index %>         value at a dot path
//! <%= @properties.name %>   value in the raw deploy config
//! <%# note %>               comment, produces nothing
//! <%%                       literal "<%"
//! ... -%>                   also drops the newline after the tag
//! ```
//!
//! This is not an ERB interpreter. Only the dot-path lookups above are
//! evaluated, and embedded Ruby is never run. Every other tag, including
//! code tags (`<% if x %>`), leading-trim tags (`<%- x %>`) and `<%=`
//! expressions beyond a plain dot path, fails with
//! `TemplateError::UnsupportedTag`.

use anyhow::Context;
use regex::Regex;

use super::namespace::ConfigNamespace;
use crate::error::{Result, TemplateError};

const TAG_PATTERN: &str = r"(?s)<%%|<%(.*?)%>";
const EXPRESSION_PATTERN: &str = r"^(@)?([\w-]+(?:\.[\w-]+)*)$";

/// Variables visible to a template.
#[derive(Debug, Clone)]
pub struct TemplateContext {
    /// Deploy config plus injected `spec.*` defaults.
    namespace: ConfigNamespace,
    /// Deploy config as loaded, reachable through `@key`.
    instance: ConfigNamespace,
}

impl TemplateContext {
    #[must_use]
    pub const fn new(namespace: ConfigNamespace, instance: ConfigNamespace) -> Self {
        Self {
            namespace,
            instance,
        }
    }

    #[must_use]
    pub const fn namespace(&self) -> &ConfigNamespace {
        &self.namespace
    }

    /// Renders `source`; `name` identifies the template in errors.
    ///
    /// # Errors
    ///
    /// Returns a `TemplateError` for an unterminated tag, an unsupported tag,
    /// or a variable that is not defined.
    pub fn render(&self, name: &str, source: &str) -> Result<String> {
        let tags = Regex::new(TAG_PATTERN).context("failed to compile template tag regex")?;
        let expression =
            Regex::new(EXPRESSION_PATTERN).context("failed to compile expression regex")?;

        let mut out = String::with_capacity(source.len());
        let mut cursor = 0;

        for caps in tags.captures_iter(source) {
            let Some(whole) = caps.get(0) else { continue };
            push_text(&mut out, name, source, cursor, whole.start())?;
            cursor = whole.end();

            let Some(body) = caps.get(1) else {
                out.push_str("<%");
                continue;
            };

            let (body, trim) = match body.as_str().strip_suffix('-') {
                Some(stripped) => (stripped, true),
                None => (body.as_str(), false),
            };

            if let Some(expr) = body.strip_prefix('=') {
                out.push_str(&self.evaluate(&expression, name, expr.trim())?);
            } else if !body.starts_with('#') {
                return Err(TemplateError::UnsupportedTag {
                    template: name.to_string(),
                    tag: whole.as_str().to_string(),
                }
                .into());
            }

            if trim {
                if source[cursor..].starts_with("\r\n") {
                    cursor += 2;
                } else if source[cursor..].starts_with('\n') {
                    cursor += 1;
                }
            }
        }

        push_text(&mut out, name, source, cursor, source.len())?;
        Ok(out)
    }

    fn evaluate(&self, expression: &Regex, name: &str, expr: &str) -> Result<String> {
        let caps = expression
            .captures(expr)
            .ok_or_else(|| TemplateError::UnsupportedTag {
                template: name.to_string(),
                tag: format!("<%= {expr} %>"),
            })?;

        let scope = if caps.get(1).is_some() {
            &self.instance
        } else {
            &self.namespace
        };
        let path = caps.get(2).map_or("", |m| m.as_str());

        scope
            .get(path)
            .map(super::namespace::NamespaceValue::render)
            .ok_or_else(|| {
                TemplateError::UnknownVariable {
                    template: name.to_string(),
                    expression: expr.to_string(),
                }
                .into()
            })
    }
}

/// Copies plain text, rejecting a tag opener that never closed.
fn push_text(out: &mut String, name: &str, source: &str, start: usize, end: usize) -> Result<()> {
    let text = &source[start..end];
    if let Some(offset) = text.find("<%") {
        return Err(TemplateError::Unterminated {
            template: name.to_string(),
            offset: start + offset,
        }
        .into());
    }
    out.push_str(text);
    Ok(())
}
