use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_supplier_table::Migration),
            Box::new(m20240101_000002_create_bahan_baku_table::Migration),
            Box::new(m20240101_000003_create_resep_table::Migration),
            Box::new(m20240101_000004_create_resep_detail_table::Migration),
            Box::new(m20240101_000005_create_purchase_order_table::Migration),
            Box::new(m20240101_000006_create_po_detail_table::Migration),
        ]
    }
}

mod m20240101_000001_create_supplier_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_supplier_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Supplier::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Supplier::IdSupplier)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(Supplier::NamaSupplier)
                                .string_len(100)
                                .not_null(),
                        )
                        .col(ColumnDef::new(Supplier::KontakPerson).string_len(100).null())
                        .col(ColumnDef::new(Supplier::Telepon).string_len(20).null())
                        .col(ColumnDef::new(Supplier::Email).string_len(100).null())
                        .col(ColumnDef::new(Supplier::Alamat).text().null())
                        .col(
                            ColumnDef::new(Supplier::Status)
                                .string_len(20)
                                .not_null()
                                .default("active"),
                        )
                        .col(
                            ColumnDef::new(Supplier::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Supplier::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_supplier_nama")
                        .table(Supplier::Table)
                        .col(Supplier::NamaSupplier)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_supplier_status")
                        .table(Supplier::Table)
                        .col(Supplier::Status)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Supplier::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum Supplier {
        Table,
        IdSupplier,
        NamaSupplier,
        KontakPerson,
        Telepon,
        Email,
        Alamat,
        Status,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000002_create_bahan_baku_table {
    use sea_orm_migration::prelude::*;

    use super::m20240101_000001_create_supplier_table::Supplier;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_bahan_baku_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(BahanBaku::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(BahanBaku::IdBahanBaku)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(BahanBaku::NamaBahan)
                                .string_len(100)
                                .not_null(),
                        )
                        .col(ColumnDef::new(BahanBaku::SupplierId).integer().not_null())
                        .col(ColumnDef::new(BahanBaku::Satuan).string_len(20).not_null())
                        .col(
                            ColumnDef::new(BahanBaku::Stok)
                                .decimal_len(10, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(BahanBaku::HargaPerSatuan)
                                .decimal_len(12, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(BahanBaku::StokMinimum)
                                .decimal_len(10, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(BahanBaku::Status)
                                .string_len(20)
                                .not_null()
                                .default("active"),
                        )
                        .col(ColumnDef::new(BahanBaku::Keterangan).text().null())
                        .col(
                            ColumnDef::new(BahanBaku::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(BahanBaku::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_bahan_baku_supplier")
                                .from(BahanBaku::Table, BahanBaku::SupplierId)
                                .to(Supplier::Table, Supplier::IdSupplier)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_bahan_baku_supplier")
                        .table(BahanBaku::Table)
                        .col(BahanBaku::SupplierId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_bahan_baku_nama")
                        .table(BahanBaku::Table)
                        .col(BahanBaku::NamaBahan)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(BahanBaku::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum BahanBaku {
        Table,
        IdBahanBaku,
        NamaBahan,
        SupplierId,
        Satuan,
        Stok,
        HargaPerSatuan,
        StokMinimum,
        Status,
        Keterangan,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000003_create_resep_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000003_create_resep_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Resep::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Resep::IdResep)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Resep::NamaResep).string_len(100).not_null())
                        .col(ColumnDef::new(Resep::Kategori).string_len(50).null())
                        .col(
                            ColumnDef::new(Resep::Status)
                                .string_len(20)
                                .not_null()
                                .default("active"),
                        )
                        .col(ColumnDef::new(Resep::Catatan).text().null())
                        .col(
                            ColumnDef::new(Resep::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Resep::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_resep_kategori")
                        .table(Resep::Table)
                        .col(Resep::Kategori)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Resep::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum Resep {
        Table,
        IdResep,
        NamaResep,
        Kategori,
        Status,
        Catatan,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000004_create_resep_detail_table {
    use sea_orm_migration::prelude::*;

    use super::m20240101_000002_create_bahan_baku_table::BahanBaku;
    use super::m20240101_000003_create_resep_table::Resep;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000004_create_resep_detail_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(ResepDetail::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ResepDetail::IdResepDetail)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(ResepDetail::IdResep).integer().not_null())
                        .col(ColumnDef::new(ResepDetail::IdBahanBaku).integer().not_null())
                        .col(
                            ColumnDef::new(ResepDetail::Jumlah)
                                .decimal_len(10, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(ResepDetail::Unit).string_len(20).null())
                        .col(
                            ColumnDef::new(ResepDetail::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ResepDetail::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_resep_detail_resep")
                                .from(ResepDetail::Table, ResepDetail::IdResep)
                                .to(Resep::Table, Resep::IdResep)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_resep_detail_bahan_baku")
                                .from(ResepDetail::Table, ResepDetail::IdBahanBaku)
                                .to(BahanBaku::Table, BahanBaku::IdBahanBaku)
                                .on_delete(ForeignKeyAction::Restrict)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_resep_detail_resep")
                        .table(ResepDetail::Table)
                        .col(ResepDetail::IdResep)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ResepDetail::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum ResepDetail {
        Table,
        IdResepDetail,
        IdResep,
        IdBahanBaku,
        Jumlah,
        Unit,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000005_create_purchase_order_table {
    use sea_orm_migration::prelude::*;

    use super::m20240101_000001_create_supplier_table::Supplier;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000005_create_purchase_order_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(PurchaseOrder::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(PurchaseOrder::IdPo)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrder::NomorPo)
                                .string_len(20)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(PurchaseOrder::TanggalPo).date().not_null())
                        .col(ColumnDef::new(PurchaseOrder::SupplierId).integer().not_null())
                        .col(
                            ColumnDef::new(PurchaseOrder::Status)
                                .string_len(20)
                                .not_null()
                                .default("draft"),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrder::TotalHarga)
                                .decimal_len(12, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrder::TanggalPengirimanDiharapkan)
                                .date()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrder::TanggalPengirimanAktual)
                                .date()
                                .null(),
                        )
                        .col(ColumnDef::new(PurchaseOrder::Catatan).text().null())
                        .col(ColumnDef::new(PurchaseOrder::DibuatOleh).string_len(50).null())
                        .col(
                            ColumnDef::new(PurchaseOrder::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrder::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_purchase_order_supplier")
                                .from(PurchaseOrder::Table, PurchaseOrder::SupplierId)
                                .to(Supplier::Table, Supplier::IdSupplier)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_purchase_order_status")
                        .table(PurchaseOrder::Table)
                        .col(PurchaseOrder::Status)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_purchase_order_tanggal")
                        .table(PurchaseOrder::Table)
                        .col(PurchaseOrder::TanggalPo)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(PurchaseOrder::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum PurchaseOrder {
        Table,
        IdPo,
        NomorPo,
        TanggalPo,
        SupplierId,
        Status,
        TotalHarga,
        TanggalPengirimanDiharapkan,
        TanggalPengirimanAktual,
        Catatan,
        DibuatOleh,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000006_create_po_detail_table {
    use sea_orm_migration::prelude::*;

    use super::m20240101_000002_create_bahan_baku_table::BahanBaku;
    use super::m20240101_000005_create_purchase_order_table::PurchaseOrder;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000006_create_po_detail_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(PoDetail::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(PoDetail::IdPoDetail)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(PoDetail::IdPo).integer().not_null())
                        .col(ColumnDef::new(PoDetail::IdBahanBaku).integer().not_null())
                        .col(
                            ColumnDef::new(PoDetail::Jumlah)
                                .decimal_len(10, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(PoDetail::HargaSatuan)
                                .decimal_len(12, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(PoDetail::Subtotal)
                                .decimal_len(12, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(PoDetail::JumlahDiterima)
                                .decimal_len(10, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(PoDetail::Status)
                                .string_len(20)
                                .not_null()
                                .default("pending"),
                        )
                        .col(
                            ColumnDef::new(PoDetail::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PoDetail::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_po_detail_purchase_order")
                                .from(PoDetail::Table, PoDetail::IdPo)
                                .to(PurchaseOrder::Table, PurchaseOrder::IdPo)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_po_detail_bahan_baku")
                                .from(PoDetail::Table, PoDetail::IdBahanBaku)
                                .to(BahanBaku::Table, BahanBaku::IdBahanBaku)
                                .on_delete(ForeignKeyAction::Restrict)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_po_detail_po")
                        .table(PoDetail::Table)
                        .col(PoDetail::IdPo)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_po_detail_status")
                        .table(PoDetail::Table)
                        .col(PoDetail::Status)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(PoDetail::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum PoDetail {
        Table,
        IdPoDetail,
        IdPo,
        IdBahanBaku,
        Jumlah,
        HargaSatuan,
        Subtotal,
        JumlahDiterima,
        Status,
        CreatedAt,
        UpdatedAt,
    }
}
