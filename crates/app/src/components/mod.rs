pub mod status_banner;
