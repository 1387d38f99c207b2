/// Special handling applied to a named metadata field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Not reported at all.
    Drop,

    /// Object whose non-boolean sub-fields are hoisted by name.
    HoistCpuInfo,

    /// Object whose `BLOCKS` sub-field is serialized to `mem_blocks`, other sub-fields hoisted.
    HoistMemory,

    /// Stored under another name.
    Rename(&'static str),

    /// Expanded to an epoch `launchdate` next to the unparsed text.
    LaunchTime,
}

/// Field rules understood by the metadata normalizer, keyed by raw field name.
pub const FIELD_RULES: &[(&str, FieldRule)] = &[
    ("survey_arguments", FieldRule::Drop),
    ("config_file", FieldRule::Drop),
    ("cpu_info", FieldRule::HoistCpuInfo),
    ("mem", FieldRule::HoistMemory),
    ("user_name", FieldRule::Rename("name")),
    ("launch_time", FieldRule::LaunchTime),
];

/// Look up the rule for `name` in `rules`.
#[must_use]
pub fn rule_for(rules: &[(&str, FieldRule)], name: &str) -> Option<FieldRule> {
    rules.iter().find(|(field, _)| *field == name).map(|(_, rule)| *rule)
}
