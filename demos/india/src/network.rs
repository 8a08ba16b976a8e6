//! The 15-city Indian trunk-road network.
//!
//! Distances are approximate highway km between city centres.

use lx_network::{load_graph_readers, CityGraph, NetworkResult};

const CITIES_CSV: &str = "\
name,lat,lon\n\
Mumbai,19.0760,72.8777\n\
Delhi,28.7041,77.1025\n\
Bangalore,12.9716,77.5946\n\
Chennai,13.0827,80.2707\n\
Kolkata,22.5726,88.3639\n\
Hyderabad,17.3850,78.4867\n\
Pune,18.5204,73.8567\n\
Ahmedabad,23.0225,72.5714\n\
Jaipur,26.9124,75.7873\n\
Lucknow,26.8467,80.9462\n\
Nagpur,21.1458,79.0882\n\
Indore,22.7196,75.8577\n\
Surat,21.1702,72.8311\n\
Vadodara,22.3072,73.1812\n\
Bhopal,23.2599,77.4126\n\
";

const ROADS_CSV: &str = "\
from,to,km\n\
Mumbai,Pune,150\n\
Mumbai,Surat,280\n\
Mumbai,Nagpur,820\n\
Delhi,Jaipur,280\n\
Delhi,Lucknow,550\n\
Delhi,Ahmedabad,950\n\
Bangalore,Chennai,350\n\
Bangalore,Hyderabad,575\n\
Bangalore,Mumbai,985\n\
Chennai,Hyderabad,625\n\
Kolkata,Lucknow,985\n\
Hyderabad,Nagpur,500\n\
Pune,Hyderabad,560\n\
Pune,Nagpur,700\n\
Ahmedabad,Surat,265\n\
Ahmedabad,Indore,420\n\
Ahmedabad,Vadodara,110\n\
Jaipur,Ahmedabad,680\n\
Nagpur,Bhopal,350\n\
Nagpur,Indore,520\n\
Indore,Bhopal,195\n\
Surat,Vadodara,140\n\
Lucknow,Nagpur,850\n\
";

/// Build the network from the embedded tables.
pub fn build_network() -> NetworkResult<CityGraph> {
    load_graph_readers(CITIES_CSV.as_bytes(), ROADS_CSV.as_bytes())
}
