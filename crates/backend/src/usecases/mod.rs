pub mod u601_inventory_csv_upload;
