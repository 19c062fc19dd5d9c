//! ES module statements linking generated files together.

/// `import {Name} from "./Name";`
pub fn import_line(name: &str) -> String {
    module_statement("import", name)
}

/// `export {Name} from "./Name";`
pub fn export_line(name: &str) -> String {
    module_statement("export", name)
}

fn module_statement(keyword: &str, name: &str) -> String {
    format!("{} {{{}}} from \"./{}\";", keyword, name, name)
}

/// Lines of the barrel file re-exporting every generated root type.
pub fn barrel_lines<S: AsRef<str>>(type_names: &[S]) -> Vec<String> {
    type_names
        .iter()
        .map(|name| export_line(name.as_ref()))
        .collect()
}
