use crate::app::command_support::load_config;
use crate::prompts::PromptCatalog;
use crate::review::Role;

pub fn cmd_prompts() -> Result<String, String> {
    let config = load_config()?;
    Ok(render_catalog(&config.settings.prompt_catalog()))
}

pub(crate) fn render_catalog(catalog: &PromptCatalog) -> String {
    Role::ALL
        .iter()
        .map(|role| format!("[{role}]\n{}", catalog.template(*role)))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_renders_in_role_order() {
        let rendered = render_catalog(&PromptCatalog::default());
        let coder = rendered.find("[coder]").expect("coder");
        let peer = rendered.find("[peer]").expect("peer");
        let manager = rendered.find("[manager]").expect("manager");
        assert!(coder < peer && peer < manager);
        assert!(rendered.contains("Create a code as per the {{code}} provided"));
    }
}
