//! AROMA config template substitution
//!
//! Pure text transformation: given the raw `aroma-config.in` template and a
//! snapshot of the installed ROM list, produce the final `aroma-config`
//! text. No state is shared across invocations.

use crate::roms::Roms;

/// Number of installer menu slots reserved ahead of the dynamic ROM list.
/// The first selectable ROM therefore lands at index 3.
pub const BASE_INDEX: usize = 3;

/// Replaced with the mbutil version string.
pub const TOKEN_VERSION: &str = "@MBTOOL_VERSION@";
/// Replaced with one menu-item line per installed ROM.
pub const TOKEN_ROM_MENU_ITEMS: &str = "@ROM_MENU_ITEMS@";
/// Replaced with one selection block per installed ROM.
pub const TOKEN_ROM_SELECTION_ITEMS: &str = "@ROM_SELECTION_ITEMS@";
/// Replaced with the index of the first selectable ROM.
pub const TOKEN_FIRST_INDEX: &str = "@FIRST_INDEX@";
/// Replaced with the index of the last selectable ROM.
pub const TOKEN_LAST_INDEX: &str = "@LAST_INDEX@";

/// One item of the substitution context: a stable ROM id plus the name
/// shown in the installer menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RomItem {
    /// Stable ROM identifier (e.g. "primary", "dual").
    pub id: String,
    /// Display name, falling back to the id when no config exists.
    pub name: String,
}

/// Immutable, ordered snapshot of the installed ROM list driving the
/// repeated template blocks.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderContext {
    items: Vec<RomItem>,
}

impl PlaceholderContext {
    /// Build a context from an explicit item list.
    pub fn new(items: Vec<RomItem>) -> Self {
        PlaceholderContext { items }
    }

    /// Snapshot the installed ROMs of a registry, resolving display names
    /// through each ROM's config.
    pub fn from_registry(roms: &Roms) -> Self {
        let items = roms
            .iter()
            .map(|rom| RomItem {
                id: rom.id.clone(),
                name: roms.display_name(&rom.id),
            })
            .collect();
        PlaceholderContext { items }
    }

    /// The items in menu order.
    pub fn items(&self) -> &[RomItem] {
        &self.items
    }
}

/// Render `template` against `ctx`, producing the final config text.
///
/// Literal tabs are rewritten to the two-character sequence `\t` before any
/// token substitution, because the AROMA config syntax forbids raw tabs.
/// All tokens are `@`-delimited and prefix-free, so a fixed substitution
/// order cannot corrupt a partially matched token.
///
/// With an empty context both repeated blocks render empty and
/// `@LAST_INDEX@` (`BASE_INDEX - 1`) is strictly below `@FIRST_INDEX@`,
/// which the installer treats as an empty selectable range, not an error.
pub fn render(template: &str, ctx: &PlaceholderContext) -> String {
    let mut menu_items = String::new();
    let mut selection_items = String::new();

    for (i, item) in ctx.items().iter().enumerate() {
        menu_items.push_str(&format!("\"{}\", \"\", \"@default\",\n", item.name));

        selection_items.push_str(&format!(
            concat!(
                "if prop(\"operations.prop\", \"selected\") == \"{}\" then\n",
                "    setvar(\"romid\", \"{}\");\n",
                "    setvar(\"romname\", \"{}\");\n",
                "endif;\n",
            ),
            BASE_INDEX + i,
            item.id,
            item.name,
        ));
    }

    template
        .replace('\t', "\\t")
        .replace(TOKEN_VERSION, crate::VERSION)
        .replace(TOKEN_ROM_MENU_ITEMS, &menu_items)
        .replace(TOKEN_ROM_SELECTION_ITEMS, &selection_items)
        .replace(TOKEN_FIRST_INDEX, &BASE_INDEX.to_string())
        .replace(
            TOKEN_LAST_INDEX,
            &(BASE_INDEX + ctx.items().len() - 1).to_string(),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn one_rom() -> PlaceholderContext {
        PlaceholderContext::new(vec![RomItem {
            id: "primary".to_string(),
            name: "Primary".to_string(),
        }])
    }

    #[test]
    fn version_and_tab_scenario() {
        let out = render("@MBTOOL_VERSION@\t", &one_rom());
        assert_eq!(out, format!("{}\\t", crate::VERSION));
    }

    #[test]
    fn menu_items_reference_display_name() {
        let out = render(TOKEN_ROM_MENU_ITEMS, &one_rom());
        assert_eq!(out, "\"Primary\", \"\", \"@default\",\n");
    }

    #[test]
    fn selection_block_is_guarded_by_base_index() {
        let out = render(TOKEN_ROM_SELECTION_ITEMS, &one_rom());
        assert_eq!(
            out,
            concat!(
                "if prop(\"operations.prop\", \"selected\") == \"3\" then\n",
                "    setvar(\"romid\", \"primary\");\n",
                "    setvar(\"romname\", \"Primary\");\n",
                "endif;\n",
            )
        );
    }

    #[test]
    fn index_tokens_for_single_rom() {
        let out = render("@FIRST_INDEX@-@LAST_INDEX@", &one_rom());
        assert_eq!(out, "3-3");
    }

    #[test]
    fn empty_registry_yields_empty_range() {
        let ctx = PlaceholderContext::default();
        let out = render(
            "@ROM_MENU_ITEMS@@ROM_SELECTION_ITEMS@@FIRST_INDEX@..@LAST_INDEX@",
            &ctx,
        );
        // last < first signals an empty selectable range, not an error
        assert_eq!(out, "3..2");
    }

    #[test]
    fn multiple_roms_number_sequentially() {
        let ctx = PlaceholderContext::new(vec![
            RomItem {
                id: "primary".to_string(),
                name: "Stock".to_string(),
            },
            RomItem {
                id: "dual".to_string(),
                name: "Secondary".to_string(),
            },
        ]);

        let out = render("@ROM_SELECTION_ITEMS@@LAST_INDEX@", &ctx);
        assert!(out.contains("== \"3\" then"));
        assert!(out.contains("== \"4\" then"));
        assert!(out.contains("setvar(\"romid\", \"dual\");"));
        assert!(out.ends_with('4'));
    }

    #[test]
    fn rendering_is_deterministic() {
        let ctx = one_rom();
        let template = "@MBTOOL_VERSION@ @ROM_MENU_ITEMS@ @FIRST_INDEX@";
        assert_eq!(render(template, &ctx), render(template, &ctx));
    }
}
