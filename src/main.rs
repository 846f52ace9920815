use std::net::{IpAddr, Ipv4Addr};

use clap::{Parser, Subcommand};
use log::error;

use nbtresolve::cache::{MemCache, MemNegativeCache};
use nbtresolve::config::{ResolverConfig, StaticResolverConfig};
use nbtresolve::dispatcher::NullDispatcher;
use nbtresolve::dns_srv::NullDnsSrv;
use nbtresolve::hosts::DnsLookupHosts;
use nbtresolve::iface::PnetInterfaces;
use nbtresolve::lmhosts::FileLmhosts;
use nbtresolve::orchestrator::{DcLookupType, Resolver};
use nbtresolve::wins::MemWinsDeadMap;

/// Resolve SMB, LDAP and Kerberos endpoints by name.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Path to an lmhosts file (defaults to an empty table)
    #[arg(long)]
    lmhosts: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a single NetBIOS or DNS name
    Name {
        name: String,
        #[arg(long, default_value_t = 0x20)]
        name_type: u16,
    },
    /// Find the PDC for a domain
    Pdc { domain: String },
    /// List domain controllers for a domain
    DcList {
        domain: String,
        #[arg(long)]
        sitename: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let args = Args::parse();

    let cache = MemCache::new();
    let negcache = MemNegativeCache::new();
    let interfaces = PnetInterfaces;
    let dns = NullDnsSrv;
    let hosts = DnsLookupHosts;
    let lmhosts = args.lmhosts.map(FileLmhosts::new).unwrap_or_else(|| FileLmhosts::new("/dev/null"));
    let config = StaticResolverConfig {
        nbt_client_socket_address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        ..StaticResolverConfig::default()
    };
    let dead_map = MemWinsDeadMap::default();

    let resolver = Resolver {
        cache: &cache,
        negcache: &negcache,
        interfaces: &interfaces,
        dns: &dns,
        hosts: &hosts,
        lmhosts: &lmhosts,
        config: &config,
        dispatcher: &NullDispatcher,
        wins_dead_map: &dead_map,
    };

    let order = config.name_resolve_order();

    let outcome = match args.command {
        Command::Name { name, name_type } => resolver.resolve(&name, name_type, None, &order).await.map(|services| {
            for s in services {
                println!("{s}");
            }
        }),
        Command::Pdc { domain } => resolver.get_pdc_ip(&domain, &order).await.map(|s| println!("{s}")),
        Command::DcList { domain, sitename } => resolver
            .get_sorted_dc_list(&domain, sitename.as_deref(), DcLookupType::Default, &order)
            .await
            .map(|services| {
                for s in services {
                    println!("{s}");
                }
            }),
    };

    if let Err(e) = outcome {
        error!("resolution failed: {e}");
        std::process::exit(1);
    }
}
