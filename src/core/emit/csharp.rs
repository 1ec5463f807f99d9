//! C# dialect: `IntPtr` fields, static classes for namespaces.

use super::Dialect;

pub struct CSharp;

impl Dialect for CSharp
{
    fn display_name(&self) -> &'static str
    {
        "C#"
    }

    fn extension(&self) -> &'static str
    {
        "cs"
    }

    fn comment(&self) -> &'static str
    {
        "//"
    }

    fn base_symbol(&self) -> &'static str
    {
        "baseAddress"
    }

    fn module_base(
        &self,
        ident: &str,
        module: &str,
    ) -> String
    {
        format!("IntPtr {ident} = GetModuleBaseAddress(procId, \"{module}\");\n")
    }

    fn address(
        &self,
        ident: &str,
        base: &str,
        offset: &str,
    ) -> String
    {
        format!("IntPtr {ident} = {base} + {offset};\n")
    }

    fn offset_list(
        &self,
        ident: &str,
        offsets: &[String],
    ) -> String
    {
        format!("int[] {ident} = {{ {} }};\n", offsets.join(", "))
    }

    fn group(
        &self,
        ident: &str,
        members: &[(String, String)],
    ) -> String
    {
        let mut out = format!("public static class {ident}\n{{\n");
        for (name, value) in members
        {
            out.push_str(&format!("    public const long {name} = {value};\n"));
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
        format!("IntPtr {ident} = new IntPtr({value});\n")
    }
}
