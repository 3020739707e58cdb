use crate::terminal::{box_bottom, box_line, box_line_center, box_opt, box_top};

pub fn print_help() {
    box_top("dpass");
    box_line_center("Deterministic per-service password derivation");
    box_line("");
    box_line("Derives a password for a service from your master password.");
    box_line("The same service and master password always produce the same");
    box_line("output, so nothing ever needs to be stored or synced.");
    box_line("");
    box_line("USAGE:");
    box_line("  dpass [OPTIONS] <SERVICE>");
    box_line("");
    box_line("ARGS:");
    box_opt("  <SERVICE>", "Service or site the password is for (e.g. github.com)");
    box_line("");
    box_line("OPTIONS:");
    box_line(" Derivation:");
    box_opt("  -l, --length <N>", "Password length, 8 to 512 (default: 16)");
    box_opt("  -nd, --no-digit", "Exclude digits 0-9 from the alphabet");
    box_opt("  -ns, --no-symbol", "Exclude punctuation from the alphabet");
    box_opt("  -na, --no-ambiguous", "Exclude easily confused characters (l 1 I 0 O)");
    box_line("");
    box_line(" Output:");
    box_opt("  -c, --copy", "Copy to clipboard instead of printing");
    box_opt("  -q, --quiet", "Print only the bare password");
    box_opt("      --show-salt", "Print salt construction details to stderr (debug)");
    box_line("");
    box_line(" Settings:");
    box_opt(
        "      --save",
        "Save the given flags as defaults (~/.config/dpass). Run without a service to only save.",
    );
    box_line("");
    box_line(" Info:");
    box_opt("  -h, --help", "Display this help message");
    box_opt("  -v, --version", "Display version");
    box_line("");
    box_line("EXAMPLES:");
    box_line("  dpass github.com             16 characters, full alphabet");
    box_line("  dpass -l 32 github.com       32 characters");
    box_line("  dpass -ns -na mail.example   No punctuation, no lookalikes");
    box_line("  dpass -c github.com          Straight to the clipboard");
    box_line("  dpass --save -l 20 -na       Save length 20 + exclusion as defaults");
    box_line("");
    box_bottom();
    println!();
}
