//! @acp:module "Report Templates"
//! @acp:summary "Handlebars templates for the session report and catalog export"
//! @acp:domain report
//! @acp:layer output

pub(crate) const SESSION_REPORT: &str = r#"# Work session report
## {{name}}

{{#if date}}Date of the work session: {{date}}
{{/if}}
{{#if authors}}Participants: {{authors}}
{{/if}}

# Case information

## Intended effect

{{#if problem_statement}}{{problem_statement}}{{else}}_Not recorded._{{/if}}

## Final considerations and instrument selection

{{#if conclusion}}{{conclusion}}{{else}}_Not recorded._{{/if}}

# Selected answers
{{#each categories}}

## {{name}}
{{#each questions}}

**{{name}}**
{{#each answers}}
- {{this}}
{{/each}}
{{#if motivation}}

> {{motivation}}
{{/if}}
{{/each}}
{{/each}}

# Advice based on the work session

| Instrument | Score | Summary |
|---|---|---|
{{#each advice}}
| {{name}} | {{score}} | {{intro}} |
{{/each}}

# Possible interventions
{{#each details}}

## {{name}}

**{{intro}}**

### When to use

{{description}}

### Considerations

{{considerations}}

### Example projects

{{examples}}

### Owner

{{owner}} {{owner_email}}

### Score

Weighted score for this session: {{score}}.

{{tags}}
{{/each}}

---
Report generated on {{generated_on}}.
"#;

pub(crate) const CATALOG_EXPORT: &str = r#"{{#if title}}# {{title}}
{{/if}}
{{#each instruments}}

## {{name}}

**{{intro}}**

### When to use

{{description}}

### Considerations

{{considerations}}

### Example projects

{{examples}}

### Links

{{#if links}}{{links}}{{else}}_None._{{/if}}

### Tags

Applies when: {{inclusion}}

Excluded by: {{exclusion}}

### Owner

{{owner}} {{owner_email}}
{{/each}}

---
{{footer}}
"#;
