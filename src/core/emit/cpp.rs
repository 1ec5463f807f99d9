//! C++ dialect: `uintptr_t` declarations, `namespace` blocks.

use super::Dialect;

pub struct Cpp;

impl Dialect for Cpp
{
    fn display_name(&self) -> &'static str
    {
        "C++"
    }

    fn extension(&self) -> &'static str
    {
        "cpp"
    }

    fn comment(&self) -> &'static str
    {
        "//"
    }

    fn base_symbol(&self) -> &'static str
    {
        "base_address"
    }

    fn module_base(
        &self,
        ident: &str,
        module: &str,
    ) -> String
    {
        format!("uintptr_t {ident} = GetModuleBaseAddress(procId, \"{module}\");\n")
    }

    fn address(
        &self,
        ident: &str,
        base: &str,
        offset: &str,
    ) -> String
    {
        format!("uintptr_t {ident} = {base} + {offset};\n")
    }

    fn offset_list(
        &self,
        ident: &str,
        offsets: &[String],
    ) -> String
    {
        format!("std::vector<unsigned int> {ident} = {{ {} }};\n", offsets.join(", "))
    }

    fn group(
        &self,
        ident: &str,
        members: &[(String, String)],
    ) -> String
    {
        let mut out = format!("namespace {ident} {{\n");
        for (name, value) in members
        {
            out.push_str(&format!("    constexpr uintptr_t {name} = {value};\n"));
        }
        out.push_str("}\n");
        out
    }

    fn direct(
        &self,
        ident: &str,
        value: &str,
    ) -> String
    {
        format!("uintptr_t {ident} = {value};\n")
    }
}
