use std::fs;
use std::io::{Error, ErrorKind};
use std::path::Path;
use std::process::Command;

fn main() {
    // The name data is embedded with `include_dir!`.
    println!("cargo:rerun-if-changed=data");
    println!("cargo:rerun-if-changed=build.rs");
    // `BUILD_INFO` names the checked-out commit. Outside a git checkout it
    // is only refreshed along with `data` or this script.
    if let Ok(head) = fs::read_to_string(".git/HEAD") {
        println!("cargo:rerun-if-changed=.git/HEAD");
        let branch_ref = head.trim().strip_prefix("ref: ").map(|r| Path::new(".git").join(r));
        if let Some(branch_ref) = branch_ref.filter(|path| path.exists()) {
            println!("cargo:rerun-if-changed={}", branch_ref.display());
        }
    }

    // Obtain build infomation from Git.
    let build_info: String =
        from_git().unwrap_or_else(|_| "(Build info from Git not present)".into());

    println!("cargo:rustc-env=BUILD_INFO={}", build_info);
}

fn run(args: &[&str]) -> Result<String, std::io::Error> {
    let out = Command::new(args[0]).args(&args[1..]).output()?;
    match out.status.success() {
        true => String::from_utf8(out.stdout)
            .map(|stdout| stdout.trim().to_string())
            .map_err(|err| Error::new(ErrorKind::InvalidData, err)),
        false => Err(Error::new(ErrorKind::Other, "Command not successful.")),
    }
}

fn from_git() -> Result<String, std::io::Error> {
    // Read the current git commit hash
    let rev = run(&["git", "rev-parse", "--verify", "--short", "HEAD"])?;

    // Read the current branch name.
    let branch = run(&["git", "rev-parse", "--abbrev-ref", "HEAD"])?;

    // Read the commit date, such as `2023-03-01`.
    let date = run(&["git", "show", "-s", "--format=%cs", "HEAD"])?;

    Ok(format!(
        "build branch \"{}\", commit {} ({})",
        branch, rev, date
    ))
}
