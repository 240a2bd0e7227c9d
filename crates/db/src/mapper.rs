//! Record <-> DTO conversion.
//!
//! Both directions are total and copy every field verbatim; deciding which
//! fields a caller may set is the service's concern.

use taproom_core::beer::BeerDto;
use taproom_core::customer::CustomerDto;

use crate::models::beer::Beer;
use crate::models::customer::Customer;

pub struct BeerMapper;

impl BeerMapper {
    pub fn beer_to_beer_dto(beer: Beer) -> BeerDto {
        BeerDto {
            id: beer.id,
            version: beer.version,
            beer_name: beer.beer_name,
            beer_style: beer.beer_style,
            upc: beer.upc,
            quantity_on_hand: beer.quantity_on_hand,
            price: beer.price,
            created_date: beer.created_date,
            updated_date: beer.updated_date,
        }
    }

    pub fn beer_dto_to_beer(dto: BeerDto) -> Beer {
        Beer {
            id: dto.id,
            version: dto.version,
            beer_name: dto.beer_name,
            beer_style: dto.beer_style,
            upc: dto.upc,
            quantity_on_hand: dto.quantity_on_hand,
            price: dto.price,
            created_date: dto.created_date,
            updated_date: dto.updated_date,
        }
    }
}

pub struct CustomerMapper;

impl CustomerMapper {
    pub fn customer_to_customer_dto(customer: Customer) -> CustomerDto {
        CustomerDto {
            id: customer.id,
            version: customer.version,
            name: customer.name,
            email: customer.email,
            created_date: customer.created_date,
            updated_date: customer.updated_date,
        }
    }

    pub fn customer_dto_to_customer(dto: CustomerDto) -> Customer {
        Customer {
            id: dto.id,
            version: dto.version,
            name: dto.name,
            email: dto.email,
            created_date: dto.created_date,
            updated_date: dto.updated_date,
        }
    }
}
