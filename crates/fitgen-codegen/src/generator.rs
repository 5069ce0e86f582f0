//! Go source generation from profile IR
//!
//! Produces the three primary artifacts (types, messages, profile) plus the
//! stringer input and the message-number consistency data.

use std::collections::HashSet;
use std::fmt::Write as _;

use chrono::Utc;
use fitgen_core::{
    GenerationRequest, GeneratorOptions, ProfileArtifacts, ProfileGenerator, SdkVersion,
};

use crate::error::{Result, WorkbookError};
use crate::ir::*;
use crate::parser::WorkbookParser;

/// Name of the message-number type in the workbook
pub const MESG_NUM_TYPE: &str = "mesg_num";

const PACKAGE: &str = "fit";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Emits Go sources for a parsed profile
pub struct SourceGenerator<'a> {
    sdk: SdkVersion,
    options: &'a GeneratorOptions,
    timestamp: Option<String>,
}

impl<'a> SourceGenerator<'a> {
    /// Create a generator for `sdk`
    pub fn new(sdk: SdkVersion, options: &'a GeneratorOptions) -> Self {
        let timestamp = options
            .embed_timestamp()
            .then(|| Utc::now().format(TIMESTAMP_FORMAT).to_string());
        Self {
            sdk,
            options,
            timestamp,
        }
    }

    /// Generate every artifact for `ir`
    pub fn generate(&self, ir: &ProfileIr) -> Result<ProfileArtifacts> {
        let logger = self.options.logger();

        let types_source = self.types_source(ir);
        logger.info(format!("typegen: {} types generated", ir.types.len()));

        let messages_source = self.messages_source(ir)?;
        logger.info(format!("msggen: {} messages generated", ir.messages.len()));

        let profile_source = self.profile_source(ir);

        Ok(ProfileArtifacts {
            types_source: types_source.into_bytes(),
            messages_source: messages_source.into_bytes(),
            profile_source: profile_source.into_bytes(),
            stringer_input: stringer_input(ir),
            mesg_nums_without_message: mesg_nums_without_message(ir),
        })
    }

    fn header(&self) -> String {
        let mut out = String::new();
        out.push_str("// Code generated by fitgen. DO NOT EDIT.\n\n");
        let _ = writeln!(out, "// SDK Version: {}", self.sdk);
        if let Some(timestamp) = &self.timestamp {
            let _ = writeln!(out, "// Generation time: {timestamp}");
        }
        let _ = write!(out, "\npackage {PACKAGE}\n");
        out
    }

    fn types_source(&self, ir: &ProfileIr) -> String {
        let mut out = self.header();

        for ty in &ir.types {
            let go_name = ty.go_name();
            if self.options.debug_output() {
                self.options.logger().debug(format!(
                    "typegen: type {} ({}): {} values",
                    ty.name,
                    ty.base_type.go_type(),
                    ty.values.len()
                ));
            }

            let _ = write!(
                out,
                "\n// {go_name} represents the {} FIT type.\ntype {go_name} {}\n",
                ty.name,
                ty.base_type.go_type()
            );
            if ty.values.is_empty() {
                continue;
            }

            out.push_str("\nconst (\n");
            for value in &ty.values {
                let _ = write!(
                    out,
                    "\t{go_name}{} {go_name} = {}",
                    camel_case(&value.name),
                    value.value
                );
                if let Some(comment) = &value.comment {
                    let _ = write!(out, " // {comment}");
                }
                out.push('\n');
            }
            out.push_str(")\n");
        }

        out
    }

    fn messages_source(&self, ir: &ProfileIr) -> Result<String> {
        let mut out = self.header();

        for msg in &ir.messages {
            let go_name = msg.go_name();
            if self.options.debug_output() {
                self.options.logger().debug(format!(
                    "msggen: message {}: {} fields",
                    msg.name,
                    msg.fields.len()
                ));
            }

            let _ = write!(
                out,
                "\n// {go_name} represents the {} FIT message type.\ntype {go_name} struct {{\n",
                msg.name
            );
            for field in &msg.fields {
                let go_type = field_go_type(ir, msg, field)?;
                let _ = write!(out, "\t{} {go_type}", camel_case(&field.name));
                if let Some(comment) = field_comment(field) {
                    let _ = write!(out, " // {comment}");
                }
                out.push('\n');
            }
            out.push_str("}\n");
        }

        Ok(out)
    }

    fn profile_source(&self, ir: &ProfileIr) -> String {
        let mut out = self.header();

        let _ = write!(
            out,
            "\nconst (\n\tProfileMajorVersion = {}\n\tProfileMinorVersion = {}\n)\n",
            self.sdk.major, self.sdk.minor
        );

        // Without a mesg_num type there is no MesgNum to list.
        if let Some(mesg_num) = ir.type_named(MESG_NUM_TYPE) {
            out.push_str(
                "\n// ProfileMesgNums lists every message number with a generated message.\n",
            );
            out.push_str("var ProfileMesgNums = []MesgNum{\n");
            let messages: HashSet<&str> = ir.messages.iter().map(|m| m.name.as_str()).collect();
            for value in &mesg_num.values {
                if messages.contains(value.name.as_str()) {
                    let _ = writeln!(out, "\tMesgNum{},", camel_case(&value.name));
                }
            }
            out.push_str("}\n");
        }

        out
    }
}

fn field_go_type(ir: &ProfileIr, msg: &MessageDef, field: &FieldDef) -> Result<String> {
    let element = if let Ok(base) = field.type_name.parse::<BaseType>() {
        base.go_type().to_string()
    } else if let Some(ty) = ir.type_named(&field.type_name) {
        ty.go_name()
    } else {
        return Err(WorkbookError::UnknownType {
            type_name: field.type_name.clone(),
            context: format!("field {:?} of message {:?}", field.name, msg.name),
        });
    };

    Ok(if field.array {
        format!("[]{element}")
    } else {
        element
    })
}

fn field_comment(field: &FieldDef) -> Option<String> {
    let parts: Vec<String> = [
        ("Scale", &field.scale),
        ("Offset", &field.offset),
        ("Units", &field.units),
    ]
    .into_iter()
    .filter_map(|(label, value)| value.as_ref().map(|v| format!("{label}: {v}")))
    .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("; "))
    }
}

/// Go names of every type that has enumerated values, in sheet order
pub fn stringer_input(ir: &ProfileIr) -> Vec<String> {
    ir.types
        .iter()
        .filter(|ty| !ty.values.is_empty())
        .map(TypeDef::go_name)
        .collect()
}

/// Message-number values that have no message of the same name
///
/// The `mfg_range_*` bounds mark a numeric range, not a message, and are
/// never reported.
pub fn mesg_nums_without_message(ir: &ProfileIr) -> Vec<String> {
    let Some(mesg_num) = ir.type_named(MESG_NUM_TYPE) else {
        return Vec::new();
    };
    let messages: HashSet<&str> = ir.messages.iter().map(|m| m.name.as_str()).collect();

    mesg_num
        .values
        .iter()
        .filter(|value| !value.name.starts_with("mfg_range"))
        .filter(|value| !messages.contains(value.name.as_str()))
        .map(|value| camel_case(&value.name))
        .collect()
}

/// [`ProfileGenerator`] backed by an `.xlsx` profile workbook
#[derive(Debug, Default, Clone, Copy)]
pub struct WorkbookProfileGenerator {
    parser: WorkbookParser,
}

impl WorkbookProfileGenerator {
    /// Create a new generator
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProfileGenerator for WorkbookProfileGenerator {
    fn generate(&self, request: &GenerationRequest) -> fitgen_core::Result<ProfileArtifacts> {
        let logger = request.options.logger();
        logger.info(format!(
            "parsing workbook ({} bytes) for sdk {}",
            request.raw_input.len(),
            request.sdk
        ));

        let ir = self.parser.parse_bytes(&request.raw_input)?;
        let artifacts = SourceGenerator::new(request.sdk, &request.options).generate(&ir)?;
        Ok(artifacts)
    }
}
