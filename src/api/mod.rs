//! Resource families of the VPC API
//!
//! Each module holds the models of one family together with the
//! [`VpcService`](crate::VpcService) methods that operate on them. Every
//! public item is re-exported here and at the crate root.
//!
//! # Module Structure
//!
//! - [`common`] - references, identities and other shapes shared across families
//! - [`geography`] - regions and zones
//! - [`vpcs`] - VPCs, address prefixes, routing tables and routes
//! - [`subnets`] - subnets and their reserved IPs
//! - [`keys`], [`images`], [`instances`], [`volumes`], [`snapshots`] - compute and storage
//! - [`instance_templates`], [`instance_groups`] - templated provisioning and autoscaling
//! - [`bare_metal_servers`] - bare metal servers, their disks and network interfaces
//! - [`floating_ips`], [`public_gateways`], [`network_acls`], [`security_groups`] - network edge
//! - [`vpn_gateways`], [`vpn_policies`], [`vpn_servers`] - site-to-site and client VPN
//! - [`load_balancers`] - load balancers, listeners, policies, rules, pools and members
//! - [`shares`] - file shares and mount targets
//! - [`dedicated_hosts`], [`placement_groups`] - host placement
//! - [`flow_logs`], [`endpoint_gateways`], [`backup_policies`]
//! - [`private_path`] - private path service gateways
//! - [`virtual_network_interfaces`]

pub mod backup_policies;
pub mod bare_metal_servers;
pub mod common;
pub mod dedicated_hosts;
pub mod endpoint_gateways;
pub mod floating_ips;
pub mod flow_logs;
pub mod geography;
pub mod images;
pub mod instance_groups;
pub mod instance_templates;
pub mod instances;
pub mod keys;
pub mod load_balancers;
pub mod network_acls;
pub mod placement_groups;
pub mod private_path;
pub mod public_gateways;
pub mod security_groups;
pub mod shares;
pub mod snapshots;
pub mod subnets;
pub mod virtual_network_interfaces;
pub mod volumes;
pub mod vpcs;
pub mod vpn_gateways;
pub mod vpn_policies;
pub mod vpn_servers;

pub use backup_policies::*;
pub use bare_metal_servers::*;
pub use common::*;
pub use dedicated_hosts::*;
pub use endpoint_gateways::*;
pub use floating_ips::*;
pub use flow_logs::*;
pub use geography::*;
pub use images::*;
pub use instance_groups::*;
pub use instance_templates::*;
pub use instances::*;
pub use keys::*;
pub use load_balancers::*;
pub use network_acls::*;
pub use placement_groups::*;
pub use private_path::*;
pub use public_gateways::*;
pub use security_groups::*;
pub use shares::*;
pub use snapshots::*;
pub use subnets::*;
pub use virtual_network_interfaces::*;
pub use volumes::*;
pub use vpcs::*;
pub use vpn_gateways::*;
pub use vpn_policies::*;
pub use vpn_servers::*;
