//! Detail page of the AI exploration service.

use edu_core::pricing::common::{ParsePriceError, discounted_price, is_valid_discount, parse_price};
use edu_core::{QnaEntry, Service};
use edu_data::Catalog;
use rust_decimal::Decimal;
use thiserror::Error;

/// Catalog position of the AI service; the detail page is fixed to it.
pub const AI_SERVICE_INDEX: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DetailError {
    #[error("catalog has no service at position {0}")]
    MissingService(usize),

    #[error(transparent)]
    InvalidPrice(#[from] ParsePriceError),

    #[error("service {service_id} has discount {discount} outside 0..=1")]
    InvalidDiscount { service_id: u32, discount: Decimal },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DetailTab {
    #[default]
    Detail,
    Qna,
}

impl DetailTab {
    pub fn label(&self) -> &'static str {
        match self {
            DetailTab::Detail => "상세정보",
            DetailTab::Qna => "Q&A",
        }
    }
}

/// What the active tab shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabContent {
    Detail(String),
    Qna(Vec<QnaEntry>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDetailView {
    pub title: String,
    pub price: Decimal,
    pub discounted_price: Decimal,
    pub active_tab: DetailTab,
    pub content: TabContent,
}

#[derive(Debug, Clone)]
pub struct ServiceDetail {
    service: Service,
    qna: Vec<QnaEntry>,
    active_tab: DetailTab,
}

impl ServiceDetail {
    pub fn new(
        service: Service,
        qna: Vec<QnaEntry>,
    ) -> Self {
        Self {
            service,
            qna,
            active_tab: DetailTab::default(),
        }
    }

    /// The AI service page built from `catalog`.
    pub fn from_catalog(catalog: &Catalog) -> Result<Self, DetailError> {
        let service = catalog
            .service_at(AI_SERVICE_INDEX)
            .cloned()
            .ok_or(DetailError::MissingService(AI_SERVICE_INDEX))?;
        Ok(Self::new(service, catalog.qna.clone()))
    }

    pub fn service(&self) -> &Service {
        &self.service
    }

    pub fn active_tab(&self) -> DetailTab {
        self.active_tab
    }

    pub fn set_tab(
        &mut self,
        tab: DetailTab,
    ) {
        self.active_tab = tab;
    }

    pub fn render(&self) -> Result<ServiceDetailView, DetailError> {
        let price = parse_price(&self.service.price)?;
        if !is_valid_discount(self.service.discount) {
            return Err(DetailError::InvalidDiscount {
                service_id: self.service.id,
                discount: self.service.discount,
            });
        }

        let content = match self.active_tab {
            DetailTab::Detail => TabContent::Detail(self.service.description.clone()),
            DetailTab::Qna => TabContent::Qna(self.qna.clone()),
        };

        Ok(ServiceDetailView {
            title: self.service.title.clone(),
            price,
            discounted_price: discounted_price(price, self.service.discount),
            active_tab: self.active_tab,
            content,
        })
    }
}
