use convert_case::{Case, Casing};

/// Lowercase, underscore-separated form of an identifier, used for file
/// and directory naming.
pub fn to_slug(name: &str) -> String {
    name.to_case(Case::Snake)
}

/// Pluralize the trailing word of a name. The suffix rules leave the rest
/// of the string untouched, so compound slugs like `dummy_model` come out
/// as `dummy_models`.
pub fn to_plural(name: &str) -> String {
    if name.ends_with('s') || name.ends_with('x') || name.ends_with("sh") || name.ends_with("ch") {
        format!("{}es", name)
    } else if name.ends_with('y') && !name.ends_with("ey") && !name.ends_with("oy") && !name.ends_with("ay") {
        format!("{}ies", &name[..name.len() - 1])
    } else {
        format!("{}s", name)
    }
}

/// Singularize the trailing word of a name. Only the suffix is rewritten,
/// so casing is preserved: `dummies` -> `dummy` and `Dummies` -> `Dummy`.
pub fn to_singular(name: &str) -> String {
    if let Some(stem) = name.strip_suffix("ies") {
        format!("{}y", stem)
    } else if name.ends_with("ses")
        || name.ends_with("xes")
        || name.ends_with("shes")
        || name.ends_with("ches")
    {
        name[..name.len() - 2].to_string()
    } else if name.ends_with('s') && !name.ends_with("ss") {
        name[..name.len() - 1].to_string()
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_from_pascal_case() {
        assert_eq!(to_slug("DummyModel"), "dummy_model");
        assert_eq!(to_slug("DummiesController"), "dummies_controller");
        assert_eq!(to_slug("HelloWorldsController"), "hello_worlds_controller");
    }

    #[test]
    fn slug_of_slug_is_stable() {
        assert_eq!(to_slug("dummy_model"), "dummy_model");
    }

    #[test]
    fn plural_regular() {
        assert_eq!(to_plural("dummy_model"), "dummy_models");
        assert_eq!(to_plural("widget"), "widgets");
    }

    #[test]
    fn plural_y_ending() {
        assert_eq!(to_plural("ability"), "abilities");
        assert_eq!(to_plural("query"), "queries");
    }

    #[test]
    fn plural_preserves_ey_oy_ay() {
        assert_eq!(to_plural("key"), "keys");
        assert_eq!(to_plural("day"), "days");
    }

    #[test]
    fn plural_s_x_endings() {
        assert_eq!(to_plural("class"), "classes");
        assert_eq!(to_plural("box"), "boxes");
    }

    #[test]
    fn singular_ies_ending() {
        assert_eq!(to_singular("dummies"), "dummy");
        assert_eq!(to_singular("queries"), "query");
    }

    #[test]
    fn singular_plain_s() {
        assert_eq!(to_singular("hello_worlds"), "hello_world");
        assert_eq!(to_singular("widgets"), "widget");
    }

    #[test]
    fn singular_es_endings() {
        assert_eq!(to_singular("classes"), "class");
        assert_eq!(to_singular("boxes"), "box");
    }

    #[test]
    fn singular_preserves_casing() {
        assert_eq!(to_singular("Dummies"), "Dummy");
        assert_eq!(to_singular("HelloWorlds"), "HelloWorld");
    }

    #[test]
    fn singular_leaves_non_plurals_alone() {
        assert_eq!(to_singular("class"), "class");
        assert_eq!(to_singular("dummy"), "dummy");
    }
}
