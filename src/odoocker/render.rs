use anyhow::Result;
use handlebars::{
    Context, Handlebars, Helper, HelperResult, Output, RenderContext, RenderError,
};
use log::debug;

use super::context::BuildContext;
use super::error::Error;
use super::loader::TemplateChain;

pub const ENTRY_TEMPLATE: &str = "main";

// Only markup gets html escaping; Dockerfile text is emitted as is.
const ESCAPED_EXTENSIONS: &[&str] = &[".html", ".htm", ".xml"];

pub fn escape_fn_for(name: &str) -> fn(&str) -> String {
    if ESCAPED_EXTENSIONS.iter().any(|ext| name.ends_with(ext)) {
        handlebars::html_escape
    } else {
        handlebars::no_escape
    }
}

// {{step "name"}} renders the template `name` with the whole context.
fn step_helper(
    h: &Helper,
    r: &Handlebars,
    ctx: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let name = h
        .param(0)
        .and_then(|p| p.value().as_str())
        .ok_or_else(|| RenderError::new("step expects a template name"))?;
    debug!("Rendering step {}", name);
    let rendered = r.render(name, ctx.data())?;
    out.write(&rendered)?;
    Ok(())
}

/// Turns a csv value into a regex alternation with literal members.
pub fn csv_regex(csv: &str) -> String {
    csv.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| item.replace('.', "\\."))
        .collect::<Vec<_>>()
        .join("|")
}

// {{csv_regex "fr_FR,en_US"}} gives fr_FR|en_US.
fn csv_regex_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let csv = h
        .param(0)
        .and_then(|p| p.value().as_str())
        .ok_or_else(|| RenderError::new("csv_regex expects a string"))?;
    out.write(&csv_regex(csv))?;
    Ok(())
}

/// Renders `ctx` starting from the `main` template.
pub fn render(ctx: &BuildContext) -> Result<String> {
    render_entry(ctx, ENTRY_TEMPLATE)
}

/// Renders `ctx` starting from `entry`, looking templates up in the context
/// `template_dirs` before the built-in set.
pub fn render_entry(ctx: &BuildContext, entry: &str) -> Result<String> {
    let chain = TemplateChain::with_dirs(&ctx.template_dirs);

    let mut handlebars = Handlebars::new();
    handlebars.set_strict_mode(true);
    handlebars.register_escape_fn(escape_fn_for(entry));
    handlebars.register_helper("step", Box::new(step_helper));
    handlebars.register_helper("csv_regex", Box::new(csv_regex_helper));

    let mut required = vec![entry.to_string()];
    required.extend(ctx.steps.iter().cloned());

    let mut names = chain.names()?;
    names.extend(required.iter().cloned());
    for name in &names {
        match chain.resolve(name)? {
            Some(source) => handlebars
                .register_template_string(name, source)
                .map_err(Error::from)?,
            None if required.contains(name) => {
                return Err(Error::TemplateNotFound { name: name.clone() }.into())
            }
            None => {}
        }
    }

    let rendered = handlebars.render(entry, ctx).map_err(Error::from)?;
    Ok(rendered)
}
