use cidr_block::Ipv4Cidr;
use clap::Parser;
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

/// Print network, broadcast, netmask and size of IPv4 CIDR blocks
#[derive(Parser)]
#[command(name = "cidr", author, version, about)]
struct Opts {
    /// Blocks such as 10.0.0.7/24 or 10.0.0.7/255.255.255.0; read from stdin when empty
    #[arg(value_name = "CIDR")]
    cidrs: Vec<String>,

    /// Field separator
    #[arg(short, long, default_value = "\t")]
    sep: String,

    /// Only print blocks contained in this one
    #[arg(short, long, value_name = "CIDR")]
    within: Option<Ipv4Cidr>,

    /// Fail on the first invalid block instead of skipping it
    #[arg(long)]
    strict: bool,
}

fn main() -> eyre::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
    let option = Opts::parse();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if option.cidrs.is_empty() {
        let stdin = io::stdin();
        for (n, line) in stdin.lock().lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            handle(&option, line, n + 1, &mut out)?;
        }
    } else {
        for (n, arg) in option.cidrs.iter().enumerate() {
            handle(&option, arg, n + 1, &mut out)?;
        }
    }
    Ok(())
}

fn handle(option: &Opts, input: &str, n: usize, out: &mut impl Write) -> eyre::Result<()> {
    let cidr = match Ipv4Cidr::parse(input) {
        Ok(cidr) => cidr,
        Err(e) if option.strict => {
            return Err(eyre::eyre!("input {}: {:?}: {}", n, input, e));
        }
        Err(e) => {
            tracing::warn!(input, n, "Skipping: {}", e);
            return Ok(());
        }
    };
    if let Some(within) = &option.within {
        if !within.contains(&cidr) {
            tracing::debug!(%cidr, %within, "Not contained");
            return Ok(());
        }
    }
    tracing::trace!(%cidr, "Parsed");
    writeln!(out, "{}", describe(&cidr, &option.sep))?;
    Ok(())
}

fn describe(cidr: &Ipv4Cidr, sep: &str) -> String {
    [
        cidr.to_string(),
        cidr.network().to_string(),
        cidr.broadcast().to_string(),
        cidr.netmask().to_string(),
        cidr.address_count().to_string(),
    ]
    .join(sep)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_fields() {
        let cidr = Ipv4Cidr::parse("10.10.1.44/27").unwrap();
        assert_eq!(
            "10.10.1.44/27,10.10.1.32/27,10.10.1.63/27,255.255.255.224,32",
            describe(&cidr, ",")
        );
    }

    #[test]
    fn handle_filters_and_skips() {
        let option = Opts::parse_from(["cidr", "--within", "12.128.0.0/9"]);
        let mut out = Vec::new();
        handle(&option, "12.150.0.0/10", 1, &mut out).unwrap();
        handle(&option, "10.0.0.1/8", 2, &mut out).unwrap();
        handle(&option, "not a block", 3, &mut out).unwrap();
        assert_eq!(
            "12.150.0.0/10\t12.128.0.0/10\t12.191.255.255/10\t255.192.0.0\t4194304\n",
            String::from_utf8(out).unwrap()
        );

        let strict = Opts::parse_from(["cidr", "--strict"]);
        assert!(handle(&strict, "1.2.3.4/33", 1, &mut Vec::new()).is_err());
    }
}
