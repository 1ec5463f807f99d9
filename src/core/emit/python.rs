//! Python dialect: module-level assignments, classes for namespaces.

use super::Dialect;

pub struct Python;

impl Dialect for Python
{
    fn display_name(&self) -> &'static str
    {
        "Python"
    }

    fn extension(&self) -> &'static str
    {
        "py"
    }

    fn comment(&self) -> &'static str
    {
        "#"
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
        format!("{ident} = GetModuleBaseAddress(pid, \"{module}\")\n")
    }

    fn address(
        &self,
        ident: &str,
        base: &str,
        offset: &str,
    ) -> String
    {
        format!("{ident} = {base} + {offset}\n")
    }

    fn offset_list(
        &self,
        ident: &str,
        offsets: &[String],
    ) -> String
    {
        format!("{ident} = [{}]\n", offsets.join(", "))
    }

    fn group(
        &self,
        ident: &str,
        members: &[(String, String)],
    ) -> String
    {
        let mut out = format!("class {ident}:\n");
        if members.is_empty()
        {
            out.push_str("    pass\n");
        }
        for (name, value) in members
        {
            out.push_str(&format!("    {name} = {value}\n"));
        }
        out
    }

    fn direct(
        &self,
        ident: &str,
        value: &str,
    ) -> String
    {
        format!("{ident} = {value}\n")
    }
}
