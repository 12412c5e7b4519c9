//! Name mapping files (obfuscated <-> readable).
//!
//! Supports the two-level tab-indented tree format produced by the merge
//! step of the fetch tool: a `tsrg2 <from> <to>` header, unindented class
//! lines and indented member lines. Method lines carry the descriptor in the
//! `from` namespace. Inversion swaps the namespaces and rewrites descriptors
//! so that `invert(invert(m)) == m`.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::util::fs;

/// A field rename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    pub obf: String,
    pub mapped: String,
}

/// A method rename. The descriptor refers to classes in the `from`
/// namespace of the owning file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodMapping {
    pub obf: String,
    pub descriptor: String,
    pub mapped: String,
}

/// A class rename with its member renames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassMapping {
    pub obf: String,
    pub mapped: String,
    pub fields: Vec<FieldMapping>,
    pub methods: Vec<MethodMapping>,
}

/// An ordered set of class/member renames between two namespaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingFile {
    pub from_namespace: String,
    pub to_namespace: String,
    pub classes: Vec<ClassMapping>,
}

impl MappingFile {
    /// Parse the tree format from text.
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text.lines().enumerate();

        let (_, header) = lines.next().context("empty mapping file")?;
        let mut header_parts = header.split_whitespace();
        if header_parts.next() != Some("tsrg2") {
            bail!("mapping file does not start with a `tsrg2` header");
        }
        let (from_namespace, to_namespace) = match (header_parts.next(), header_parts.next()) {
            (Some(from), Some(to)) => (from.to_string(), to.to_string()),
            _ => bail!("mapping header must name two namespaces"),
        };

        let mut classes: Vec<ClassMapping> = Vec::new();
        for (lineno, line) in lines {
            if line.trim().is_empty() {
                continue;
            }
            let indented = line.starts_with('\t');
            let tokens: Vec<&str> = line.split_whitespace().collect();

            if !indented {
                match tokens.as_slice() {
                    [obf, mapped] => classes.push(ClassMapping {
                        obf: obf.to_string(),
                        mapped: mapped.to_string(),
                        fields: Vec::new(),
                        methods: Vec::new(),
                    }),
                    _ => bail!("malformed class mapping on line {}: `{}`", lineno + 1, line),
                }
                continue;
            }

            let class = classes
                .last_mut()
                .with_context(|| format!("member mapping before any class on line {}", lineno + 1))?;
            match tokens.as_slice() {
                [obf, mapped] => class.fields.push(FieldMapping {
                    obf: obf.to_string(),
                    mapped: mapped.to_string(),
                }),
                [obf, descriptor, mapped] if descriptor.starts_with('(') => {
                    class.methods.push(MethodMapping {
                        obf: obf.to_string(),
                        descriptor: descriptor.to_string(),
                        mapped: mapped.to_string(),
                    })
                }
                _ => bail!(
                    "malformed member mapping on line {}: `{}`",
                    lineno + 1,
                    line
                ),
            }
        }

        Ok(MappingFile {
            from_namespace,
            to_namespace,
            classes,
        })
    }

    /// Load a mapping file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
            .with_context(|| format!("failed to parse mapping file: {}", path.display()))
    }

    /// Render the tree format.
    pub fn to_text(&self) -> String {
        let mut out = format!("tsrg2 {} {}\n", self.from_namespace, self.to_namespace);
        for class in &self.classes {
            out.push_str(&format!("{} {}\n", class.obf, class.mapped));
            for field in &class.fields {
                out.push_str(&format!("\t{} {}\n", field.obf, field.mapped));
            }
            for method in &class.methods {
                out.push_str(&format!(
                    "\t{} {} {}\n",
                    method.obf, method.descriptor, method.mapped
                ));
            }
        }
        out
    }

    /// Write the mapping file to disk.
    pub fn write(&self, path: &Path) -> Result<()> {
        fs::write_string(path, &self.to_text())
    }

    /// Invert the mapping: swap obfuscated and readable names, rewriting
    /// method descriptors into the new `from` namespace.
    ///
    /// Within a single namespace the class mapping is a bijection, so
    /// inversion is lossless and involutive.
    pub fn invert(&self) -> MappingFile {
        let class_map: HashMap<&str, &str> = self
            .classes
            .iter()
            .map(|c| (c.obf.as_str(), c.mapped.as_str()))
            .collect();

        let classes = self
            .classes
            .iter()
            .map(|class| ClassMapping {
                obf: class.mapped.clone(),
                mapped: class.obf.clone(),
                fields: class
                    .fields
                    .iter()
                    .map(|f| FieldMapping {
                        obf: f.mapped.clone(),
                        mapped: f.obf.clone(),
                    })
                    .collect(),
                methods: class
                    .methods
                    .iter()
                    .map(|m| MethodMapping {
                        obf: m.mapped.clone(),
                        descriptor: remap_descriptor(&m.descriptor, &class_map),
                        mapped: m.obf.clone(),
                    })
                    .collect(),
            })
            .collect();

        MappingFile {
            from_namespace: self.to_namespace.clone(),
            to_namespace: self.from_namespace.clone(),
            classes,
        }
    }
}

/// Rewrite every `L<class>;` reference in a JVM descriptor through the class
/// map. Classes without a mapping entry keep their name.
fn remap_descriptor(descriptor: &str, class_map: &HashMap<&str, &str>) -> String {
    let mut out = String::with_capacity(descriptor.len());
    let mut rest = descriptor;

    while let Some(start) = rest.find('L') {
        match rest[start..].find(';') {
            Some(offset) => {
                let end = start + offset;
                out.push_str(&rest[..=start]);
                let name = &rest[start + 1..end];
                out.push_str(class_map.get(name).copied().unwrap_or(name));
                out.push(';');
                rest = &rest[end + 1..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}
